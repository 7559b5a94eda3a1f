//! Type filter for the board.
//!
//! Filtering is stable: the result keeps the store's relative order and
//! never adds, drops (beyond the predicate) or reorders items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::models::{ItemType, RoadmapItem};

/// Which item types are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Pass-through
    #[default]
    All,
    Kaf,
    Feature,
}

impl TypeFilter {
    /// Order of the options in the filter control.
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Kaf, TypeFilter::Feature];

    /// Value used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Kaf => "kaf",
            TypeFilter::Feature => "feature",
        }
    }

    /// Label shown in the filter control.
    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "All Items",
            TypeFilter::Kaf => "KAF",
            TypeFilter::Feature => "Features",
        }
    }

    /// Next option in the control, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Kaf,
            TypeFilter::Kaf => TypeFilter::Feature,
            TypeFilter::Feature => TypeFilter::All,
        }
    }

    pub fn matches(&self, item: &RoadmapItem) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Kaf => item.item_type == ItemType::Kaf,
            TypeFilter::Feature => item.item_type == ItemType::Feature,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "kaf" => Ok(TypeFilter::Kaf),
            "feature" | "features" => Ok(TypeFilter::Feature),
            _ => Err(Error::InvalidInput(format!(
                "Invalid filter '{}'. Valid filters: all, kaf, feature",
                s
            ))),
        }
    }
}

/// Items matching `filter`, in their original relative order.
pub fn filter_items(items: &[RoadmapItem], filter: TypeFilter) -> Vec<&RoadmapItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_items;

    fn ids(items: &[&RoadmapItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_all_is_identity() {
        let items = sample_items();
        assert_eq!(ids(&filter_items(&items, TypeFilter::All)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_type_filters_preserve_order() {
        let items = sample_items();
        assert_eq!(ids(&filter_items(&items, TypeFilter::Kaf)), vec![2, 4]);
        assert_eq!(ids(&filter_items(&items, TypeFilter::Feature)), vec![1, 3]);
    }

    #[test]
    fn test_filter_partitions_items() {
        let mut items = sample_items();
        items.reverse();
        let kaf = filter_items(&items, TypeFilter::Kaf);
        let feature = filter_items(&items, TypeFilter::Feature);
        assert_eq!(kaf.len() + feature.len(), items.len());
        assert!(kaf.iter().all(|i| i.item_type == ItemType::Kaf));
        assert_eq!(ids(&feature), vec![3, 1]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ALL".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!("Kaf".parse::<TypeFilter>().unwrap(), TypeFilter::Kaf);
        assert_eq!("Features".parse::<TypeFilter>().unwrap(), TypeFilter::Feature);
        assert!("bugs".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_next_cycles_through_every_option() {
        let mut filter = TypeFilter::All;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(filter);
            filter = filter.next();
        }
        assert_eq!(seen, TypeFilter::ALL.to_vec());
        assert_eq!(filter, TypeFilter::All);
    }

    #[test]
    fn test_empty_source() {
        assert!(filter_items(&[], TypeFilter::Kaf).is_empty());
    }
}
