//! Command implementations for the roadmap CLI.
//!
//! Every command works against a [`Workspace`]: the board loaded from the
//! configured snapshot (or the sample roadmap) plus where to write it back.
//! Mutating commands drive the same add/edit dialogs the terminal board
//! uses, so validation and notifications behave identically.

use serde::Serialize;
use tracing::debug;

use crate::board::{Board, FormState, TypeFilter};
use crate::config::ResolvedConfig;
use crate::models::{ItemStatus, ItemType, Priority, RoadmapItem};
use crate::render::CardContent;
use crate::render::timeline::{TimelineMarker, draw_strip};
use crate::store::snapshot::Snapshot;
use crate::{Error, FormField, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

/// The board a command operates on.
#[derive(Debug)]
pub struct Workspace {
    board: Board,
    snapshot: Option<Snapshot>,
}

impl Workspace {
    /// Load the board described by `config`.
    pub fn open(config: &ResolvedConfig) -> Result<Self> {
        let snapshot = config.board_path().map(Snapshot::new);
        let store = match snapshot {
            Some(ref snapshot) => snapshot.load()?,
            None => crate::store::ItemStore::with_sample_items(),
        };
        let board = Board::new(store)
            .with_filter(config.default_filter())
            .with_date_format(config.date_format())
            .with_toast_duration(config.toast_duration());
        Ok(Self { board, snapshot })
    }

    /// Workspace around an in-memory board.
    pub fn in_memory(board: Board) -> Self {
        Self {
            board,
            snapshot: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Write the board back. Returns whether a snapshot is configured.
    pub fn save(&self) -> Result<bool> {
        match self.snapshot {
            Some(ref snapshot) => {
                snapshot.save(self.board.store())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn parse_filter(filter: Option<&str>, board: &Board) -> Result<TypeFilter> {
    match filter {
        Some(s) => s.parse(),
        None => Ok(board.filter()),
    }
}

// === list ===

#[derive(Serialize)]
pub struct ItemList {
    pub filter: TypeFilter,
    pub count: usize,
    pub items: Vec<RoadmapItem>,
}

impl Output for ItemList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Project Roadmap: {} ({} item{})",
            self.filter.label(),
            self.count,
            if self.count == 1 { "" } else { "s" }
        )];
        if self.items.is_empty() {
            lines.push("  No items to display".to_string());
        }
        for item in &self.items {
            lines.push(String::new());
            lines.push(CardContent::from_item(item).to_text());
        }
        lines.join("\n")
    }
}

/// List the visible items.
pub fn list(workspace: &mut Workspace, filter: Option<&str>) -> Result<ItemList> {
    let filter = parse_filter(filter, workspace.board())?;
    let board = workspace.board_mut();
    board.set_filter(filter);
    let items: Vec<RoadmapItem> = board.visible_items().into_iter().cloned().collect();
    Ok(ItemList {
        filter,
        count: items.len(),
        items,
    })
}

// === show ===

#[derive(Serialize)]
pub struct ItemDetail {
    pub item: RoadmapItem,
    pub card: CardContent,
}

impl Output for ItemDetail {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        self.card.to_text()
    }
}

/// Show one item's card.
pub fn show(workspace: &Workspace, id: u64) -> Result<ItemDetail> {
    let item = workspace
        .board()
        .store()
        .get(id)
        .ok_or(Error::ItemNotFound(id))?;
    Ok(ItemDetail {
        item: item.clone(),
        card: CardContent::from_item(item),
    })
}

// === timeline ===

#[derive(Serialize)]
pub struct TimelineView {
    pub filter: TypeFilter,
    pub markers: Vec<TimelineMarker>,
    #[serde(skip)]
    pub width: u16,
}

impl Output for TimelineView {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.markers.is_empty() {
            return format!("Timeline: {}\n  No items to display", self.filter.label());
        }
        let [axis, upper, lower] = draw_strip(&self.markers, self.width);
        let mut lines = vec![format!("Timeline: {}", self.filter.label()), axis, upper];
        if !lower.is_empty() {
            lines.push(lower);
        }
        lines.join("\n")
    }
}

/// Lay out the timeline of visible items.
pub fn timeline(
    workspace: &mut Workspace,
    filter: Option<&str>,
    width: u16,
) -> Result<TimelineView> {
    let filter = parse_filter(filter, workspace.board())?;
    let board = workspace.board_mut();
    board.set_filter(filter);
    Ok(TimelineView {
        filter,
        markers: board.timeline(),
        width,
    })
}

// === add / edit ===

/// Field values given on the command line. `None` leaves the form's value.
#[derive(Debug, Clone, Default)]
pub struct ItemFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub item_type: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl ItemFields {
    fn fill(self, form: &mut FormState) -> Result<()> {
        // Parse choices first so a bad value leaves the form untouched
        let item_type = self.item_type.as_deref().map(str::parse::<ItemType>).transpose()?;
        let status = self.status.as_deref().map(str::parse::<ItemStatus>).transpose()?;
        let priority = self.priority.as_deref().map(str::parse::<Priority>).transpose()?;

        if let Some(title) = self.title {
            form.set_text(FormField::Title, title);
        }
        if let Some(description) = self.description {
            form.set_text(FormField::Description, description);
        }
        if let Some(due) = self.due {
            form.set_text(FormField::DueDate, due);
        }
        if let Some(item_type) = item_type {
            form.item_type = item_type;
        }
        if let Some(status) = status {
            form.status = status;
        }
        if let Some(priority) = priority {
            form.priority = priority;
        }
        Ok(())
    }
}

/// The confirmation raised by a successful submit.
#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct Saved {
    pub item: RoadmapItem,
    pub notification: Option<Confirmation>,
    /// Whether the board was written to a snapshot file
    pub saved: bool,
}

impl Output for Saved {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = String::new();
        if let Some(ref note) = self.notification {
            out.push_str(&format!("{}: {}\n", note.title, note.description));
        }
        out.push_str(&CardContent::from_item(&self.item).to_text());
        if !self.saved {
            out.push_str("\n(no board file configured; change not saved)");
        }
        out
    }
}

fn submit(workspace: &mut Workspace, fields: ItemFields) -> Result<Saved> {
    let board = workspace.board_mut();
    let filled = match board.form_mut() {
        Some(form) => fields.fill(form),
        None => Err(Error::NoOpenDialog),
    };
    let submitted = filled.and_then(|_| board.submit_dialog());
    let submitted = match submitted {
        Ok(submitted) => submitted,
        Err(err) => {
            // Nobody is left to correct the form
            let _ = board.cancel_dialog();
            return Err(err);
        }
    };

    let notification = board.notifications().latest().map(|toast| Confirmation {
        title: toast.title.clone(),
        description: toast.description.clone(),
    });
    let item = submitted.item().clone();
    let saved = workspace.save()?;
    debug!(id = item.id, saved, "command committed");
    Ok(Saved {
        item,
        notification,
        saved,
    })
}

/// Add an item through the add dialog.
pub fn add(workspace: &mut Workspace, fields: ItemFields) -> Result<Saved> {
    workspace.board_mut().open_add()?;
    submit(workspace, fields)
}

/// Edit an item through its pre-populated edit dialog.
pub fn edit(workspace: &mut Workspace, id: u64, fields: ItemFields) -> Result<Saved> {
    workspace.board_mut().open_edit(id)?;
    submit(workspace, fields)
}

// === config show ===

#[derive(Serialize)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: Option<String>,
    pub source: Option<String>,
}

#[derive(Serialize)]
pub struct ConfigView {
    pub config_path: Option<String>,
    pub values: Vec<ConfigEntry>,
}

impl Output for ConfigView {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Config file: {}",
            self.config_path.as_deref().unwrap_or("(none)")
        )];
        for entry in &self.values {
            match (&entry.value, &entry.source) {
                (Some(value), Some(source)) => {
                    lines.push(format!("  {} = {} ({})", entry.key, value, source))
                }
                _ => lines.push(format!("  {} = (unset)", entry.key)),
            }
        }
        lines.join("\n")
    }
}

/// Show the resolved configuration with value sources.
pub fn config_show(config: &ResolvedConfig) -> ConfigView {
    let entry = |key, value: String, source: String| ConfigEntry {
        key,
        value: Some(value),
        source: Some(source),
    };

    let board = match config.board {
        Some(ref board) => entry(
            "board",
            board.value.display().to_string(),
            board.source.to_string(),
        ),
        None => ConfigEntry {
            key: "board",
            value: None,
            source: None,
        },
    };

    ConfigView {
        config_path: config.config_path.as_ref().map(|p| p.display().to_string()),
        values: vec![
            board,
            entry(
                "default-filter",
                config.default_filter.value.to_string(),
                config.default_filter.source.to_string(),
            ),
            entry(
                "date-format",
                config.date_format.value.clone(),
                config.date_format.source.to_string(),
            ),
            entry(
                "toast-seconds",
                config.toast_seconds.value.to_string(),
                config.toast_seconds.source.to_string(),
            ),
            entry(
                "output-format",
                config.output_format.value.to_string(),
                config.output_format.source.to_string(),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::config::{ConfigOverrides, resolver::resolve_with};
    use tempfile::TempDir;

    fn workspace() -> Workspace {
        Workspace::in_memory(Board::default())
    }

    fn new_item() -> ItemFields {
        ItemFields {
            title: Some("X".to_string()),
            description: Some("d".to_string()),
            due: Some("2024-05-01".to_string()),
            item_type: Some("kaf".to_string()),
            status: Some("planned".to_string()),
            priority: Some("low".to_string()),
        }
    }

    #[test]
    fn test_list_with_filter() {
        let mut ws = workspace();
        let result = list(&mut ws, Some("kaf")).unwrap();
        assert_eq!(result.count, 2);
        assert!(result.items.iter().all(|i| i.item_type == ItemType::Kaf));
        assert!(result.to_human().starts_with("Project Roadmap: KAF (2 items)"));
    }

    #[test]
    fn test_list_rejects_unknown_filter() {
        let mut ws = workspace();
        assert!(matches!(list(&mut ws, Some("bugs")), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_show_missing_item() {
        let ws = workspace();
        assert!(matches!(show(&ws, 99), Err(Error::ItemNotFound(99))));
    }

    #[test]
    fn test_show_json_has_item_and_card() {
        let ws = workspace();
        let json: serde_json::Value =
            serde_json::from_str(&show(&ws, 2).unwrap().to_json()).unwrap();
        assert_eq!(json["item"]["type"], "KAF");
        assert_eq!(json["item"]["dueDate"], "2024-03-20");
        assert_eq!(json["card"]["due"], "Due: March 20, 2024");
    }

    #[test]
    fn test_add_assigns_next_id() {
        let mut ws = workspace();
        let saved = add(&mut ws, new_item()).unwrap();
        assert_eq!(saved.item.id, 5);
        assert!(!saved.saved);
        let note = saved.notification.unwrap();
        assert_eq!(note.title, "Item added");
        assert_eq!(ws.board().store().items().last().unwrap().id, 5);
        assert!(ws.board().active_dialog().is_none());
    }

    #[test]
    fn test_add_with_empty_title_is_rejected() {
        let mut ws = workspace();
        let fields = ItemFields {
            title: Some(String::new()),
            ..new_item()
        };
        let err = add(&mut ws, fields).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(ws.board().store().len(), 4);
        assert!(ws.board().active_dialog().is_none());
    }

    #[test]
    fn test_add_with_bad_choice_is_rejected() {
        let mut ws = workspace();
        let fields = ItemFields {
            priority: Some("urgent".to_string()),
            ..new_item()
        };
        assert!(matches!(add(&mut ws, fields), Err(Error::InvalidInput(_))));
        assert_eq!(ws.board().store().len(), 4);
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let mut ws = workspace();
        let before = ws.board().store().get(2).unwrap().clone();
        let fields = ItemFields {
            status: Some("completed".to_string()),
            ..Default::default()
        };
        let saved = edit(&mut ws, 2, fields).unwrap();
        assert_eq!(saved.item.status, ItemStatus::Completed);
        assert_eq!(saved.item.title, before.title);
        assert_eq!(saved.item.due_date, before.due_date);
        assert_eq!(saved.notification.unwrap().title, "Item updated");
        assert_eq!(ws.board().store().items()[1].id, 2);
    }

    #[test]
    fn test_edit_missing_item() {
        let mut ws = workspace();
        assert!(matches!(
            edit(&mut ws, 42, ItemFields::default()),
            Err(Error::ItemNotFound(42))
        ));
    }

    #[test]
    fn test_add_writes_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        let overrides = ConfigOverrides::new().with_board(&path);
        let config = resolve_with(&overrides, None, BoardConfig::default(), None).unwrap();

        let mut ws = Workspace::open(&config).unwrap();
        assert!(add(&mut ws, new_item()).unwrap().saved);

        let reopened = Workspace::open(&config).unwrap();
        assert_eq!(reopened.board().store().len(), 5);
        assert_eq!(reopened.board().store().get(5).unwrap().title, "X");
    }

    #[test]
    fn test_timeline_human_output() {
        let mut ws = workspace();
        let view = timeline(&mut ws, Some("feature"), 30).unwrap();
        assert_eq!(view.markers.len(), 2);
        let text = view.to_human();
        assert!(text.starts_with("Timeline: Features"));
        assert!(text.contains("Mar 15, 2024"));
        assert!(text.contains("Apr 01, 2024"));
    }

    #[test]
    fn test_config_show_sources() {
        let config =
            resolve_with(&ConfigOverrides::new(), None, BoardConfig::default(), None).unwrap();
        let view = config_show(&config);
        let human = view.to_human();
        assert!(human.contains("board = (unset)"));
        assert!(human.contains("toast-seconds = 5 (default)"));
    }
}
