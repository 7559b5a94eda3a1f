//! Fixed colour mappings for statuses and priorities.

use serde::Serialize;

use crate::models::{ItemStatus, Priority};

/// Named colour, mapped to a concrete terminal colour by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Swatch {
    Gray,
    Amber,
    Green,
    Red,
    Blue,
    Rose,
}

impl Swatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Swatch::Gray => "gray",
            Swatch::Amber => "amber",
            Swatch::Green => "green",
            Swatch::Red => "red",
            Swatch::Blue => "blue",
            Swatch::Rose => "rose",
        }
    }
}

/// Timeline marker and status chip colour.
pub fn status_swatch(status: ItemStatus) -> Swatch {
    match status {
        ItemStatus::Planned => Swatch::Gray,
        ItemStatus::InProgress => Swatch::Amber,
        ItemStatus::Completed => Swatch::Green,
        ItemStatus::OnHold => Swatch::Red,
    }
}

/// Card priority indicator colour.
pub fn priority_swatch(priority: Priority) -> Swatch {
    match priority {
        Priority::Low => Swatch::Blue,
        Priority::Medium => Swatch::Amber,
        Priority::High => Swatch::Rose,
    }
}
