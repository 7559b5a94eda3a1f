//! In-memory item store.
//!
//! `ItemStore` exclusively owns the canonical, insertion-ordered sequence of
//! roadmap items. Views borrow from it and are recomputed after every change.

pub mod snapshot;

use tracing::debug;

use crate::models::{ItemDraft, ItemPatch, RoadmapItem, sample_items};
use crate::{Error, Result};

/// Ordered collection of roadmap items with id assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<RoadmapItem>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sample roadmap.
    pub fn with_sample_items() -> Self {
        Self {
            items: sample_items(),
        }
    }

    /// Build a store from a loaded sequence, keeping its order.
    ///
    /// Fails with `DuplicateId` if two items share an id.
    pub fn from_items(items: Vec<RoadmapItem>) -> Result<Self> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(Error::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Id the next `add` will assign: current maximum plus one, or 1 when empty.
    ///
    /// Fails with `IdsExhausted` once the maximum is `u64::MAX`; ids are
    /// never wrapped or reused.
    pub fn next_id(&self) -> Result<u64> {
        let max = self.items.iter().map(|item| item.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(Error::IdsExhausted(max))
    }

    /// Append a new item built from `draft` and return it.
    pub fn add(&mut self, draft: ItemDraft) -> Result<&RoadmapItem> {
        let id = self.next_id()?;
        debug!(id, title = %draft.title, "adding roadmap item");
        self.items.push(RoadmapItem::from_draft(id, draft));
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace every field but `id` of the item with the given id, in place.
    pub fn update(&mut self, id: u64, patch: ItemPatch) -> Result<&RoadmapItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(Error::ItemNotFound(id))?;

        debug!(id, "updating roadmap item");
        self.items[index].apply(patch);
        Ok(&self.items[index])
    }

    pub fn get(&self, id: u64) -> Option<&RoadmapItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[RoadmapItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemStatus, ItemType, Priority};
    use chrono::NaiveDate;

    fn draft(title: &str) -> ItemDraft {
        ItemDraft {
            title: title.to_string(),
            description: "d".to_string(),
            item_type: ItemType::Kaf,
            status: ItemStatus::Planned,
            priority: Priority::Low,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_add_to_empty_store_starts_at_one() {
        let mut store = ItemStore::new();
        assert_eq!(store.add(draft("first")).unwrap().id, 1);
        assert_eq!(store.add(draft("second")).unwrap().id, 2);
    }

    #[test]
    fn test_add_appends_after_max_id() {
        let mut store = ItemStore::with_sample_items();
        let item = store.add(draft("X")).unwrap().clone();
        assert_eq!(item.id, 5);
        assert_eq!(store.items().last(), Some(&item));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        let mut items = sample_items();
        items.truncate(1);
        items[0].id = 10;
        let mut store = ItemStore::from_items(items).unwrap();
        assert_eq!(store.add(draft("X")).unwrap().id, 11);
    }

    #[test]
    fn test_ids_strictly_increase_across_edits() {
        let mut store = ItemStore::new();
        let mut last = 0;
        for n in 0..5 {
            let id = store.add(draft(&format!("item {}", n))).unwrap().id;
            assert!(id > last);
            last = id;
            let mut patch = store.get(id).unwrap().to_patch();
            patch.title = "edited".to_string();
            store.update(id, patch).unwrap();
        }
        let mut ids: Vec<u64> = store.items().iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_update_changes_only_target() {
        let mut store = ItemStore::with_sample_items();
        let before = store.items().to_vec();

        let mut patch = store.get(2).unwrap().to_patch();
        patch.status = ItemStatus::Completed;
        store.update(2, patch).unwrap();

        for (old, new) in before.iter().zip(store.items()) {
            assert_eq!(old.id, new.id);
            if old.id == 2 {
                assert_eq!(new.status, ItemStatus::Completed);
                assert_eq!(new.title, old.title);
                assert_eq!(new.due_date, old.due_date);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut store = ItemStore::with_sample_items();
        let before = store.clone();
        let err = store.update(99, draft("ghost")).unwrap_err();
        assert!(matches!(err, Error::ItemNotFound(99)));
        assert_eq!(store, before);
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let mut items = sample_items();
        items[3].id = 1;
        assert!(matches!(
            ItemStore::from_items(items),
            Err(Error::DuplicateId(1))
        ));
    }

    #[test]
    fn test_add_after_max_id_fails_without_wrapping() {
        let mut items = sample_items();
        items.truncate(1);
        items[0].id = u64::MAX;
        let mut store = ItemStore::from_items(items).unwrap();
        let before = store.clone();

        assert!(matches!(store.next_id(), Err(Error::IdsExhausted(u64::MAX))));
        assert!(matches!(
            store.add(draft("X")),
            Err(Error::IdsExhausted(u64::MAX))
        ));
        assert_eq!(store, before);
    }
}
