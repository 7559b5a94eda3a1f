//! Transient notifications for board actions.
//!
//! Provides toasts (title plus description) with auto-dismiss, overflow
//! handling, and a bounded notification history.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Maximum number of toasts to display at once
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Default auto-dismiss duration in seconds
pub const DEFAULT_DISMISS_SECONDS: u64 = 5;

/// Maximum history entries to keep
const MAX_HISTORY_ENTRIES: usize = 100;

/// Notification level (determines styling)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    /// Item added or updated
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Get icon/prefix for this level
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    /// Unique ID for this toast
    pub id: u64,
    pub level: NotificationLevel,
    /// Short headline, e.g. "Item updated"
    pub title: String,
    pub description: String,
    /// When the toast was created
    pub created_at: Instant,
    /// How long before auto-dismiss
    pub duration: Duration,
    pub dismissed: bool,
}

impl Toast {
    /// Create a toast that dismisses itself after `duration`
    pub fn new(
        id: u64,
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            level,
            title: title.into(),
            description: description.into(),
            created_at: Instant::now(),
            duration,
            dismissed: false,
        }
    }

    /// Check if this toast should be dismissed due to timeout
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }
}

/// Entry in the notification history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
    /// When the notification was raised
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_toast(toast: &Toast) -> Self {
        Self {
            level: toast.level,
            title: toast.title.clone(),
            description: toast.description.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Format relative time since notification
    pub fn relative_time(&self) -> String {
        let duration = Utc::now().signed_duration_since(self.timestamp);

        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            format!("{}d ago", duration.num_days())
        }
    }
}

/// Notification manager - handles toasts and history
#[derive(Debug)]
pub struct NotificationManager {
    /// Active toasts (newest first)
    toasts: VecDeque<Toast>,
    history: VecDeque<HistoryEntry>,
    next_id: u64,
    /// Auto-dismiss delay for new toasts
    dismiss_after: Duration,
    /// Whether history overlay is visible
    pub history_visible: bool,
    /// Selected history index (for navigation)
    pub history_selected: usize,
    /// Count of pending (overflow) toasts not displayed
    pub overflow_count: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::with_dismiss_after(Duration::from_secs(DEFAULT_DISMISS_SECONDS))
    }

    /// Create a manager whose toasts dismiss after `dismiss_after`
    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            history: VecDeque::new(),
            next_id: 1,
            dismiss_after,
            history_visible: false,
            history_selected: 0,
            overflow_count: 0,
        }
    }

    /// Add a new notification
    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) {
        let toast = Toast::new(self.next_id, level, title, description, self.dismiss_after);
        self.next_id += 1;

        self.history.push_front(HistoryEntry::from_toast(&toast));
        if self.history.len() > MAX_HISTORY_ENTRIES {
            self.history.pop_back();
        }

        self.toasts.push_front(toast);
        self.update_overflow();
    }

    pub fn info(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, description);
    }

    pub fn success(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, description);
    }

    pub fn warning(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(NotificationLevel::Warning, title, description);
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, description);
    }

    /// Remove expired and dismissed toasts
    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.dismissed && !t.is_expired());
        self.update_overflow();
    }

    /// Dismiss the oldest visible toast
    pub fn dismiss_oldest(&mut self) {
        let visible_count = self.toasts.len().min(MAX_VISIBLE_TOASTS);
        if visible_count > 0 {
            if let Some(toast) = self.toasts.get_mut(visible_count - 1) {
                toast.dismiss();
            }
        }
        self.cleanup();
    }

    /// Get visible toasts (limited by MAX_VISIBLE_TOASTS)
    pub fn visible_toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().take(MAX_VISIBLE_TOASTS)
    }

    /// Most recent toast, if any is still active
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.front()
    }

    pub fn has_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    fn update_overflow(&mut self) {
        self.overflow_count = self.toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
    }

    /// Toggle history overlay visibility
    pub fn toggle_history(&mut self) {
        self.history_visible = !self.history_visible;
        if self.history_visible {
            self.history_selected = 0;
        }
    }

    pub fn close_history(&mut self) {
        self.history_visible = false;
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Navigate history selection down
    pub fn history_next(&mut self) {
        if self.history_selected < self.history.len().saturating_sub(1) {
            self.history_selected += 1;
        }
    }

    /// Navigate history selection up
    pub fn history_previous(&mut self) {
        self.history_selected = self.history_selected.saturating_sub(1);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history_selected = 0;
    }
}
