//! Data models for roadmap entities.
//!
//! This module defines the core data structures:
//! - `RoadmapItem` - A feature or fix placed on the roadmap
//! - `ItemType`, `ItemStatus`, `Priority` - The fixed enumerations every item carries
//! - `ItemDraft` / `ItemPatch` - Typed payloads produced by the add and edit forms

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Date format used for `dueDate` on the wire and in form input.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Classification of a roadmap item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Fix/defect work
    #[serde(rename = "KAF")]
    Kaf,
    /// New capability work
    #[default]
    Feature,
}

impl ItemType {
    /// Every type, in the order the type selector offers them.
    pub const ALL: [ItemType; 2] = [ItemType::Kaf, ItemType::Feature];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Kaf => "KAF",
            ItemType::Feature => "Feature",
        }
    }

    /// Label shown by the type selector.
    pub fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kaf" => Ok(ItemType::Kaf),
            "feature" => Ok(ItemType::Feature),
            _ => Err(Error::InvalidInput(format!(
                "Invalid type '{}'. Valid types: KAF, Feature",
                s
            ))),
        }
    }
}

/// Lifecycle stage of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    OnHold,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Planned,
        ItemStatus::InProgress,
        ItemStatus::Completed,
        ItemStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Planned => "planned",
            ItemStatus::InProgress => "in-progress",
            ItemStatus::Completed => "completed",
            ItemStatus::OnHold => "on-hold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Planned => "Planned",
            ItemStatus::InProgress => "In Progress",
            ItemStatus::Completed => "Completed",
            ItemStatus::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "planned" => Ok(ItemStatus::Planned),
            "in-progress" => Ok(ItemStatus::InProgress),
            "completed" => Ok(ItemStatus::Completed),
            "on-hold" => Ok(ItemStatus::OnHold),
            _ => Err(Error::InvalidInput(format!(
                "Invalid status '{}'. Valid statuses: planned, in-progress, completed, on-hold",
                s
            ))),
        }
    }
}

/// Urgency tier of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::InvalidInput(format!(
                "Invalid priority '{}'. Valid priorities: low, medium, high",
                s
            ))),
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_due_date(s: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT).map_err(|_| {
        Error::InvalidInput(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2024-05-01')",
            s
        ))
    })
}

/// A work item placed on the roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    /// Unique identifier, assigned by the store
    pub id: u64,

    /// Display title
    pub title: String,

    /// Free text, rendered as Markdown
    pub description: String,

    /// KAF or Feature
    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub status: ItemStatus,

    pub priority: Priority,

    /// Due date (serialized as `YYYY-MM-DD`)
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
}

impl RoadmapItem {
    /// Build an item from a draft and an id chosen by the store.
    pub fn from_draft(id: u64, draft: ItemDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            item_type: draft.item_type,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
        }
    }

    /// Replace every field except `id`.
    pub fn apply(&mut self, patch: ItemPatch) {
        self.title = patch.title;
        self.description = patch.description;
        self.item_type = patch.item_type;
        self.status = patch.status;
        self.priority = patch.priority;
        self.due_date = patch.due_date;
    }

    /// The editable fields of this item as a patch.
    pub fn to_patch(&self) -> ItemPatch {
        ItemDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            item_type: self.item_type,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}

/// Every field of an item except `id`, already typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub priority: Priority,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
}

/// Full replacement for an existing item's fields. Shares the draft's shape.
pub type ItemPatch = ItemDraft;

fn sample_item(
    id: u64,
    title: &str,
    description: &str,
    item_type: ItemType,
    status: ItemStatus,
    priority: Priority,
    (year, month, day): (i32, u32, u32),
) -> RoadmapItem {
    RoadmapItem {
        id,
        title: title.to_string(),
        description: description.to_string(),
        item_type,
        status,
        priority,
        due_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}

/// Items a fresh board starts with.
pub fn sample_items() -> Vec<RoadmapItem> {
    vec![
        sample_item(
            1,
            "User Authentication System",
            "Implement secure login and registration functionality",
            ItemType::Feature,
            ItemStatus::Completed,
            Priority::High,
            (2024, 3, 15),
        ),
        sample_item(
            2,
            "Dashboard Bug Fix",
            "Fix data visualization issues in the main dashboard",
            ItemType::Kaf,
            ItemStatus::InProgress,
            Priority::Medium,
            (2024, 3, 20),
        ),
        sample_item(
            3,
            "API Integration",
            "Connect to third-party payment processing service",
            ItemType::Feature,
            ItemStatus::Planned,
            Priority::High,
            (2024, 4, 1),
        ),
        sample_item(
            4,
            "Performance Optimization",
            "Improve loading times for large data sets",
            ItemType::Kaf,
            ItemStatus::Planned,
            Priority::Low,
            (2024, 4, 15),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_parse_case_insensitive() {
        assert_eq!("kaf".parse::<ItemType>().unwrap(), ItemType::Kaf);
        assert_eq!("KAF".parse::<ItemType>().unwrap(), ItemType::Kaf);
        assert_eq!("Feature".parse::<ItemType>().unwrap(), ItemType::Feature);
        assert!("bug".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_status_parse_accepts_underscores() {
        assert_eq!(
            "in_progress".parse::<ItemStatus>().unwrap(),
            ItemStatus::InProgress
        );
        assert_eq!("On-Hold".parse::<ItemStatus>().unwrap(), ItemStatus::OnHold);
        assert!("done".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_priority_display_matches_parse() {
        for priority in Priority::ALL {
            assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
        }
    }

    #[test]
    fn test_item_json_uses_original_field_names() {
        let item = &sample_items()[1];
        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["type"], "KAF");
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["dueDate"], "2024-03-20");
    }

    #[test]
    fn test_item_json_rejects_unknown_status() {
        let json = r#"{"id":1,"title":"t","description":"d","type":"KAF","status":"done","priority":"low","dueDate":"2024-01-01"}"#;
        assert!(serde_json::from_str::<RoadmapItem>(json).is_err());
    }

    #[test]
    fn test_apply_patch_keeps_id() {
        let mut item = sample_items()[0].clone();
        let mut patch = item.to_patch();
        patch.title = "Renamed".to_string();
        patch.status = ItemStatus::OnHold;
        item.apply(patch);
        assert_eq!(item.id, 1);
        assert_eq!(item.title, "Renamed");
        assert_eq!(item.status, ItemStatus::OnHold);
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(
            parse_due_date("2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(parse_due_date("2024-02-30").is_err());
        assert!(parse_due_date("May 1").is_err());
    }

    #[test]
    fn test_sample_items_have_unique_ids() {
        let items = sample_items();
        let mut ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
