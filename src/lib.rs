//! Roadmap board - a timeline of features and fixes with add/edit forms.
//!
//! This library provides the core functionality for the `roadmap` CLI and
//! terminal board, including the item store, type filtering, timeline
//! layout, card rendering, and the add/edit form state machine.

pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod render;
pub mod store;
#[cfg(feature = "tui")]
pub mod tui;

pub use board::{Board, DialogKind, FormField, ValidationError};
pub use models::{ItemDraft, ItemPatch, ItemStatus, ItemType, Priority, RoadmapItem};
pub use store::ItemStore;

/// Library-level error type for roadmap operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    #[error("Duplicate item id: {0}")]
    DuplicateId(u64),

    #[error("No item id left after {0}")]
    IdsExhausted(u64),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot open the {requested} dialog while the {open} dialog is open")]
    DialogConflict {
        open: DialogKind,
        requested: DialogKind,
    },

    #[error("No dialog is open")]
    NoOpenDialog,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for roadmap operations.
pub type Result<T> = std::result::Result<T, Error>;
