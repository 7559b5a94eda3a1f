//! JSON snapshot file for a board's items.
//!
//! The file holds the item array exactly as the store orders it. A missing
//! file means a fresh board seeded with the sample roadmap.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::ItemStore;
use crate::Result;
use crate::models::RoadmapItem;

/// A snapshot file location.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store, falling back to the sample roadmap when the file is absent.
    pub fn load(&self) -> Result<ItemStore> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "snapshot missing, using sample items");
            return Ok(ItemStore::with_sample_items());
        }

        let content = fs::read_to_string(&self.path)?;
        let items: Vec<RoadmapItem> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = items.len(), "loaded snapshot");
        ItemStore::from_items(items)
    }

    /// Write every item, creating parent directories as needed.
    pub fn save(&self, store: &ItemStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(store.items())?;
        fs::write(&self.path, content)?;
        info!(path = %self.path.display(), count = store.len(), "saved snapshot");
        Ok(())
    }
}
