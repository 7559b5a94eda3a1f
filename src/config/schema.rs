//! KDL schema for config.kdl.
//!
//! This module provides:
//! - Rust structs representing the KDL schema
//! - Parsing from a KDL document
//! - Validation functions

use std::path::PathBuf;

use chrono::NaiveDate;
use kdl::KdlDocument;
use serde::{Deserialize, Serialize};

use crate::board::TypeFilter;
use crate::render::timeline::try_format_date;

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bounds for `toast-seconds`.
pub const TOAST_SECONDS_RANGE: std::ops::RangeInclusive<u64> = 1..=60;

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// board "/home/me/roadmap.json"
/// default-filter "kaf"
/// date-format "%b %d, %Y"
/// toast-seconds 5
/// output-format "human"  // or "json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Snapshot file holding the board's items
    pub board: Option<PathBuf>,

    /// Filter the board starts with
    pub default_filter: Option<TypeFilter>,

    /// strftime pattern for timeline labels
    pub date_format: Option<String>,

    /// Seconds before a toast dismisses itself
    pub toast_seconds: Option<u64>,

    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,
}

fn first_string<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a str> {
    doc.get(name)?.entries().first()?.value().as_string()
}

fn first_integer(doc: &KdlDocument, name: &str) -> Option<i128> {
    doc.get(name)?.entries().first()?.value().as_integer()
}

/// Whether `pattern` is a usable strftime pattern for dates.
///
/// Time and zone specifiers parse fine but have nothing to format on a
/// `NaiveDate`, so the pattern is tried on a sample date.
pub fn is_valid_date_format(pattern: &str) -> bool {
    if pattern.trim().is_empty() {
        return false;
    }
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|sample| try_format_date(sample, pattern))
        .is_some()
}

impl BoardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(seconds) = self.toast_seconds {
            if !TOAST_SECONDS_RANGE.contains(&seconds) {
                return Err(format!("toast-seconds must be 1-60, got {}", seconds));
            }
        }
        if let Some(ref pattern) = self.date_format {
            if !is_valid_date_format(pattern) {
                return Err(format!("date-format '{}' is not a valid pattern", pattern));
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    ///
    /// Unlike unknown nodes, which are ignored, a present but malformed value
    /// is an error so a typo never silently falls back to a default.
    pub fn from_kdl(doc: &KdlDocument) -> Result<Self, String> {
        let mut config = Self::new();

        config.board = first_string(doc, "board").map(PathBuf::from);

        if let Some(s) = first_string(doc, "default-filter") {
            let filter = s.parse::<TypeFilter>().map_err(|e| e.to_string())?;
            config.default_filter = Some(filter);
        }

        config.date_format = first_string(doc, "date-format").map(str::to_string);

        if doc.get("toast-seconds").is_some() {
            let seconds = first_integer(doc, "toast-seconds")
                .and_then(|i| u64::try_from(i).ok())
                .ok_or_else(|| "toast-seconds must be a positive integer".to_string())?;
            config.toast_seconds = Some(seconds);
        }

        if let Some(s) = first_string(doc, "output-format") {
            let format = OutputFormat::parse(s).ok_or_else(|| {
                format!("output-format must be \"json\" or \"human\", got \"{}\"", s)
            })?;
            config.output_format = Some(format);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kdl: &str) -> Result<BoardConfig, String> {
        let doc: KdlDocument = kdl.parse().unwrap();
        BoardConfig::from_kdl(&doc)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("HUMAN"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("invalid"), None);
    }

    #[test]
    fn test_config_from_kdl_empty() {
        let doc = KdlDocument::new();
        assert_eq!(BoardConfig::from_kdl(&doc).unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_config_from_kdl_all_fields() {
        let config = parse(
            r#"
board "/tmp/roadmap.json"
default-filter "KAF"
date-format "%d/%m/%Y"
toast-seconds 8
output-format "human"
"#,
        )
        .unwrap();
        assert_eq!(config.board, Some(PathBuf::from("/tmp/roadmap.json")));
        assert_eq!(config.default_filter, Some(TypeFilter::Kaf));
        assert_eq!(config.date_format.as_deref(), Some("%d/%m/%Y"));
        assert_eq!(config.toast_seconds, Some(8));
        assert_eq!(config.output_format, Some(OutputFormat::Human));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(parse(r#"default-filter "bugs""#).is_err());
        assert!(parse("toast-seconds 0").is_err());
        assert!(parse("toast-seconds -3").is_err());
        assert!(parse(r#"output-format "xml""#).is_err());
        assert!(parse(r#"date-format "%Q""#).is_err());
    }

    #[test]
    fn test_config_ignores_unknown_nodes() {
        let config = parse(r#"editor "nvim""#).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_date_format_validation() {
        assert!(is_valid_date_format("%b %d, %Y"));
        assert!(!is_valid_date_format(""));
        assert!(!is_valid_date_format("%Q"));
    }

    #[test]
    fn test_date_format_rejects_time_specifiers() {
        assert!(!is_valid_date_format("%H:%M"));
        assert!(!is_valid_date_format("%Y %z"));
        assert!(parse(r#"date-format "%H:%M""#).is_err());
    }
}
