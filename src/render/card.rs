//! Card renderer: one item's full detail plus an edit affordance.

use serde::Serialize;

use super::markup::{self, StyledLine};
use super::palette::{Swatch, priority_swatch, status_swatch};
use super::timeline::format_long_date;
use crate::models::RoadmapItem;

/// Everything a card shows, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardContent {
    pub id: u64,
    /// Type badge text
    pub badge: String,
    /// Status chip text
    pub status: String,
    pub status_color: Swatch,
    /// Priority indicator colour
    pub priority: String,
    pub priority_color: Swatch,
    pub title: String,
    #[serde(skip)]
    pub description: Vec<StyledLine>,
    /// "Due: March 15, 2024"
    pub due: String,
}

impl CardContent {
    pub fn from_item(item: &RoadmapItem) -> Self {
        Self {
            id: item.id,
            badge: item.item_type.to_string(),
            status: item.status.to_string(),
            status_color: status_swatch(item.status),
            priority: item.priority.to_string(),
            priority_color: priority_swatch(item.priority),
            title: item.title.clone(),
            description: markup::render(&item.description),
            due: format!("Due: {}", format_long_date(item.due_date)),
        }
    }

    /// Plain-text rendering used by human-readable CLI output.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "[{}] {}  ({}, {} priority)\n  {}\n",
            self.id, self.title, self.badge, self.priority, self.status
        );
        for line in &self.description {
            out.push_str(&format!("  {}\n", line.plain()));
        }
        out.push_str(&format!("  {}", self.due));
        out
    }
}

/// A card bound to its item and an edit callback.
///
/// The callback takes no arguments; the caller closes over whatever
/// context it needs to know which item was activated.
pub struct Card<'a, F: FnMut()> {
    item: &'a RoadmapItem,
    on_edit: F,
}

impl<'a, F: FnMut()> Card<'a, F> {
    pub fn new(item: &'a RoadmapItem, on_edit: F) -> Self {
        Self { item, on_edit }
    }

    pub fn item(&self) -> &'a RoadmapItem {
        self.item
    }

    pub fn content(&self) -> CardContent {
        CardContent::from_item(self.item)
    }

    /// The edit affordance was activated.
    pub fn activate_edit(&mut self) {
        (self.on_edit)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_items;

    #[test]
    fn test_content_fields() {
        let items = sample_items();
        let content = CardContent::from_item(&items[1]);
        assert_eq!(content.badge, "KAF");
        assert_eq!(content.status, "in-progress");
        assert_eq!(content.status_color, Swatch::Amber);
        assert_eq!(content.priority_color, Swatch::Amber);
        assert_eq!(content.due, "Due: March 20, 2024");
        assert_eq!(
            content.description[0].plain(),
            "Fix data visualization issues in the main dashboard"
        );
    }

    #[test]
    fn test_edit_callback_fires_once_per_activation() {
        let items = sample_items();
        let mut clicks = Vec::new();
        {
            let item = &items[0];
            let mut card = Card::new(item, || clicks.push(item.id));
            card.activate_edit();
            card.activate_edit();
        }
        assert_eq!(clicks, vec![1, 1]);
    }

    #[test]
    fn test_text_rendering() {
        let items = sample_items();
        let text = CardContent::from_item(&items[0]).to_text();
        assert!(text.starts_with("[1] User Authentication System  (Feature, high priority)"));
        assert!(text.contains("completed"));
        assert!(text.ends_with("Due: March 15, 2024"));
    }
}
