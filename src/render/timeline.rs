//! Timeline layout.
//!
//! Markers are placed by their index among the visible items, not by date:
//! item `i` of `n` sits at `i / (n - 1)` along the axis, and a lone item sits
//! at `0`. The order is the filtered list order; dates are never sorted.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::palette::{Swatch, status_swatch};
use crate::models::{ItemStatus, RoadmapItem};

/// Timeline label pattern, e.g. "Mar 15, 2024".
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

/// Long form used on cards, e.g. "March 15, 2024".
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// One item's marker on the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMarker {
    pub item_id: u64,
    /// Normalized position in `[0, 1]`
    pub position: f64,
    pub status: ItemStatus,
    pub color: Swatch,
    /// Formatted due date
    pub label: String,
}

/// Normalized position of the `index`-th of `count` markers.
pub fn position(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    index as f64 / (count - 1) as f64
}

/// Map a normalized position onto a column in `0..width`.
pub fn marker_column(position: f64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let span = f64::from(width - 1);
    (position.clamp(0.0, 1.0) * span).round() as u16
}

/// Format `date` with a strftime pattern, or `None` if the pattern needs
/// fields a date doesn't have (`%H`, `%z`, ...).
pub fn try_format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

fn format_label(date: NaiveDate, pattern: &str) -> String {
    try_format_date(date, pattern).unwrap_or_else(|| {
        warn!(pattern, "unusable date format, using default");
        date.format(DEFAULT_DATE_FORMAT).to_string()
    })
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

/// Lay out markers with the default label format.
pub fn layout(items: &[&RoadmapItem]) -> Vec<TimelineMarker> {
    layout_with_format(items, DEFAULT_DATE_FORMAT)
}

/// Lay out markers, formatting labels with a strftime pattern.
pub fn layout_with_format(items: &[&RoadmapItem], date_format: &str) -> Vec<TimelineMarker> {
    let count = items.len();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| TimelineMarker {
            item_id: item.id,
            position: position(index, count),
            status: item.status,
            color: status_swatch(item.status),
            label: format_label(item.due_date, date_format),
        })
        .collect()
}

/// Draw the axis as text: the rule with a dot per marker, then the labels
/// alternating between two rows so neighbours don't collide.
pub fn draw_strip(markers: &[TimelineMarker], width: u16) -> [String; 3] {
    let cols = usize::from(width.max(1));
    let mut axis = vec!['─'; cols];
    let mut rows = [vec![' '; cols], vec![' '; cols]];

    for (index, marker) in markers.iter().enumerate() {
        let col = usize::from(marker_column(marker.position, cols as u16));
        axis[col] = '●';

        let label: Vec<char> = marker.label.chars().collect();
        let len = label.len().min(cols);
        let start = col.saturating_sub(len / 2).min(cols - len);
        rows[index % 2][start..start + len].copy_from_slice(&label[..len]);
    }

    let [upper, lower] = rows;
    [
        axis.into_iter().collect(),
        upper.into_iter().collect::<String>().trim_end().to_string(),
        lower.into_iter().collect::<String>().trim_end().to_string(),
    ]
}
