//! Add/edit form controller.
//!
//! Each dialog (add, edit) is a two-state machine: `Closed` or `Open` with a
//! transient form. Opening one dialog while the other is open is rejected.
//! Submitting validates the required fields, marshals the form into a typed
//! draft, and commits it to the store before closing.

use std::fmt;

use tracing::{info, warn};

use crate::models::{
    ISO_DATE_FORMAT, ItemDraft, ItemStatus, ItemType, Priority, RoadmapItem, parse_due_date,
};
use crate::store::ItemStore;
use crate::{Error, Result};

/// Which dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Add,
    Edit,
}

impl DialogKind {
    /// Dialog heading.
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::Add => "Add New Roadmap Item",
            DialogKind::Edit => "Edit Roadmap Item",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            DialogKind::Add => "Add Item",
            DialogKind::Edit => "Save Changes",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogKind::Add => write!(f, "add"),
            DialogKind::Edit => write!(f, "edit"),
        }
    }
}

/// Input fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Type,
    Status,
    Priority,
    DueDate,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Description,
        FormField::Type,
        FormField::Status,
        FormField::Priority,
        FormField::DueDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Type => "Type",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::DueDate => "Due Date",
        }
    }

    /// Free-text fields; the rest are fixed-choice selectors.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Description | FormField::DueDate
        )
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::Description)
    }

    pub fn is_required(&self) -> bool {
        self.is_text()
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    InvalidDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FormField,
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Missing => write!(f, "{} is required", self.field.label()),
            IssueKind::InvalidDate => {
                write!(f, "{} must be a date in YYYY-MM-DD format", self.field.label())
            }
        }
    }
}

/// A submit was rejected because of empty or malformed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.issues.iter().map(|issue| issue.field)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.fields().any(|f| f == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Transient state of an open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: DialogKind,
    /// Item being edited; `None` for the add dialog
    target: Option<u64>,
    pub title: String,
    pub description: String,
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub priority: Priority,
    /// Raw date input, `YYYY-MM-DD`
    pub due_date: String,
    focus: FormField,
    issues: Vec<FieldIssue>,
}

impl FormState {
    /// Empty add form with the default choices.
    pub fn blank() -> Self {
        Self {
            kind: DialogKind::Add,
            target: None,
            title: String::new(),
            description: String::new(),
            item_type: ItemType::Feature,
            status: ItemStatus::Planned,
            priority: Priority::Medium,
            due_date: String::new(),
            focus: FormField::Title,
            issues: Vec::new(),
        }
    }

    /// Edit form pre-populated from `item`.
    pub fn for_item(item: &RoadmapItem) -> Self {
        Self {
            kind: DialogKind::Edit,
            target: Some(item.id),
            title: item.title.clone(),
            description: item.description.clone(),
            item_type: item.item_type,
            status: item.status,
            priority: item.priority,
            due_date: item.due_date.format(ISO_DATE_FORMAT).to_string(),
            focus: FormField::Title,
            issues: Vec::new(),
        }
    }

    pub fn target(&self) -> Option<u64> {
        self.target
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.index() + 1) % FormField::ALL.len();
        self.focus = FormField::ALL[next];
    }

    pub fn focus_previous(&mut self) {
        let len = FormField::ALL.len();
        self.focus = FormField::ALL[(self.focus.index() + len - 1) % len];
    }

    /// Current value of a text field.
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::DueDate => Some(&self.due_date),
            _ => None,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            _ => None,
        }
    }

    /// Replace a text field's value. Returns false for choice fields.
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) -> bool {
        match self.text_mut(field) {
            Some(text) => {
                *text = value.into();
                self.clear_issue(field);
                true
            }
            None => false,
        }
    }

    /// Type a character into the focused text field.
    pub fn insert_char(&mut self, c: char) {
        let field = self.focus;
        if c == '\n' && !field.is_multiline() {
            return;
        }
        if let Some(text) = self.text_mut(field) {
            text.push(c);
            self.clear_issue(field);
        }
    }

    /// Delete the last character of the focused text field.
    pub fn backspace(&mut self) {
        let field = self.focus;
        if let Some(text) = self.text_mut(field) {
            text.pop();
            self.clear_issue(field);
        }
    }

    /// Step the focused choice field through its option set, wrapping.
    pub fn cycle_choice(&mut self, forward: bool) {
        fn step<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
            let len = options.len();
            let index = options.iter().position(|o| *o == current).unwrap_or(0);
            let next = if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            };
            options[next]
        }

        match self.focus {
            FormField::Type => self.item_type = step(&ItemType::ALL, self.item_type, forward),
            FormField::Status => self.status = step(&ItemStatus::ALL, self.status, forward),
            FormField::Priority => self.priority = step(&Priority::ALL, self.priority, forward),
            _ => {}
        }
    }

    /// Label of the selected option of a choice field.
    pub fn choice_label(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::Type => Some(self.item_type.label()),
            FormField::Status => Some(self.status.label()),
            FormField::Priority => Some(self.priority.label()),
            _ => None,
        }
    }

    /// Issues recorded by the last rejected submit.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn issue_for(&self, field: FormField) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }

    fn clear_issue(&mut self, field: FormField) {
        self.issues.retain(|issue| issue.field != field);
    }

    /// Check required fields and build the typed payload.
    pub fn validate(&self) -> std::result::Result<ItemDraft, ValidationError> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(FieldIssue {
                field: FormField::Title,
                kind: IssueKind::Missing,
            });
        }
        if self.description.trim().is_empty() {
            issues.push(FieldIssue {
                field: FormField::Description,
                kind: IssueKind::Missing,
            });
        }

        let due_date = if self.due_date.trim().is_empty() {
            issues.push(FieldIssue {
                field: FormField::DueDate,
                kind: IssueKind::Missing,
            });
            None
        } else {
            match parse_due_date(&self.due_date) {
                Ok(date) => Some(date),
                Err(_) => {
                    issues.push(FieldIssue {
                        field: FormField::DueDate,
                        kind: IssueKind::InvalidDate,
                    });
                    None
                }
            }
        };

        match due_date {
            Some(due_date) if issues.is_empty() => Ok(ItemDraft {
                title: self.title.trim().to_string(),
                description: self.description.clone(),
                item_type: self.item_type,
                status: self.status,
                priority: self.priority,
                due_date,
            }),
            _ => Err(ValidationError { issues }),
        }
    }
}

/// Visibility of one dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open(FormState),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open(_))
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(RoadmapItem),
    Updated(RoadmapItem),
}

impl Submitted {
    pub fn item(&self) -> &RoadmapItem {
        match self {
            Submitted::Added(item) | Submitted::Updated(item) => item,
        }
    }
}

/// Owns the add and edit dialogs.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    add: DialogState,
    edit: DialogState,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, kind: DialogKind) -> &DialogState {
        match kind {
            DialogKind::Add => &self.add,
            DialogKind::Edit => &self.edit,
        }
    }

    fn state_mut(&mut self, kind: DialogKind) -> &mut DialogState {
        match kind {
            DialogKind::Add => &mut self.add,
            DialogKind::Edit => &mut self.edit,
        }
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.state(kind).is_open()
    }

    /// The dialog currently open, if any.
    pub fn active_kind(&self) -> Option<DialogKind> {
        if self.add.is_open() {
            Some(DialogKind::Add)
        } else if self.edit.is_open() {
            Some(DialogKind::Edit)
        } else {
            None
        }
    }

    pub fn active(&self) -> Option<&FormState> {
        let kind = self.active_kind()?;
        match self.state(kind) {
            DialogState::Open(form) => Some(form),
            DialogState::Closed => None,
        }
    }

    pub fn active_mut(&mut self) -> Option<&mut FormState> {
        let kind = self.active_kind()?;
        match self.state_mut(kind) {
            DialogState::Open(form) => Some(form),
            DialogState::Closed => None,
        }
    }

    fn guard(&self, requested: DialogKind) -> Result<()> {
        let other = match requested {
            DialogKind::Add => DialogKind::Edit,
            DialogKind::Edit => DialogKind::Add,
        };
        if self.is_open(other) {
            warn!(%requested, open = %other, "dialog already open");
            return Err(Error::DialogConflict {
                open: other,
                requested,
            });
        }
        Ok(())
    }

    /// Open the add dialog with default values. An already open add dialog is kept as is.
    pub fn open_add(&mut self) -> Result<&mut FormState> {
        self.guard(DialogKind::Add)?;
        if !self.add.is_open() {
            self.add = DialogState::Open(FormState::blank());
        }
        match &mut self.add {
            DialogState::Open(form) => Ok(form),
            DialogState::Closed => Err(Error::NoOpenDialog),
        }
    }

    /// Open the edit dialog pre-populated from `item`.
    pub fn open_edit(&mut self, item: &RoadmapItem) -> Result<&mut FormState> {
        self.guard(DialogKind::Edit)?;
        let same_target = match &self.edit {
            DialogState::Open(form) => form.target == Some(item.id),
            DialogState::Closed => false,
        };
        if self.edit.is_open() && !same_target {
            return Err(Error::DialogConflict {
                open: DialogKind::Edit,
                requested: DialogKind::Edit,
            });
        }
        if !same_target {
            self.edit = DialogState::Open(FormState::for_item(item));
        }
        match &mut self.edit {
            DialogState::Open(form) => Ok(form),
            DialogState::Closed => Err(Error::NoOpenDialog),
        }
    }

    /// Close the open dialog without touching the store.
    pub fn cancel(&mut self) -> Result<DialogKind> {
        let kind = self.active_kind().ok_or(Error::NoOpenDialog)?;
        *self.state_mut(kind) = DialogState::Closed;
        Ok(kind)
    }

    /// Validate and commit the open dialog, then close it.
    ///
    /// On a validation failure or a vanished edit target the dialog stays
    /// open and the store is unchanged.
    pub fn submit(&mut self, store: &mut ItemStore) -> Result<Submitted> {
        let form = self.active_mut().ok_or(Error::NoOpenDialog)?;
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(err) => {
                warn!(kind = %form.kind, error = %err, "submit rejected");
                form.issues = err.issues.clone();
                return Err(err.into());
            }
        };
        form.issues.clear();
        let kind = form.kind;
        let target = form.target;

        let submitted = match (kind, target) {
            (DialogKind::Edit, Some(id)) => Submitted::Updated(store.update(id, draft)?.clone()),
            _ => Submitted::Added(store.add(draft)?.clone()),
        };

        info!(%kind, id = submitted.item().id, "dialog submitted");
        *self.state_mut(kind) = DialogState::Closed;
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(form: &mut FormState) {
        form.set_text(FormField::Title, "X");
        form.set_text(FormField::Description, "d");
        form.set_text(FormField::DueDate, "2024-05-01");
    }

    #[test]
    fn test_open_add_uses_defaults() {
        let mut forms = FormController::new();
        let form = forms.open_add().unwrap();
        assert_eq!(form.item_type, ItemType::Feature);
        assert_eq!(form.status, ItemStatus::Planned);
        assert_eq!(form.priority, Priority::Medium);
        assert!(form.title.is_empty());
        assert_eq!(forms.active_kind(), Some(DialogKind::Add));
    }

    #[test]
    fn test_open_edit_prepopulates() {
        let store = ItemStore::with_sample_items();
        let mut forms = FormController::new();
        let form = forms.open_edit(store.get(2).unwrap()).unwrap();
        assert_eq!(form.target(), Some(2));
        assert_eq!(form.title, "Dashboard Bug Fix");
        assert_eq!(form.status, ItemStatus::InProgress);
        assert_eq!(form.due_date, "2024-03-20");
    }

    #[test]
    fn test_both_dialogs_cannot_be_open() {
        let store = ItemStore::with_sample_items();
        let mut forms = FormController::new();
        forms.open_add().unwrap();
        let err = forms.open_edit(store.get(1).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::DialogConflict {
                open: DialogKind::Add,
                requested: DialogKind::Edit
            }
        ));
        assert!(!forms.is_open(DialogKind::Edit));

        forms.cancel().unwrap();
        forms.open_edit(store.get(1).unwrap()).unwrap();
        assert!(forms.open_add().is_err());
    }

    #[test]
    fn test_reopening_add_keeps_typed_values() {
        let mut forms = FormController::new();
        forms.open_add().unwrap().set_text(FormField::Title, "draft");
        assert_eq!(forms.open_add().unwrap().title, "draft");
    }

    #[test]
    fn test_cancel_without_dialog() {
        let mut forms = FormController::new();
        assert!(matches!(forms.cancel(), Err(Error::NoOpenDialog)));
    }

    #[test]
    fn test_submit_add_appends_and_closes() {
        let mut store = ItemStore::with_sample_items();
        let mut forms = FormController::new();
        let form = forms.open_add().unwrap();
        filled(form);
        form.item_type = ItemType::Kaf;
        form.priority = Priority::Low;

        let submitted = forms.submit(&mut store).unwrap();
        assert!(matches!(submitted, Submitted::Added(_)));
        assert_eq!(submitted.item().id, 5);
        assert_eq!(store.items().last().unwrap().title, "X");
        assert_eq!(forms.active_kind(), None);
    }

    #[test]
    fn test_submit_empty_title_keeps_dialog_open() {
        let mut store = ItemStore::with_sample_items();
        let before = store.clone();
        let mut forms = FormController::new();
        let form = forms.open_add().unwrap();
        filled(form);
        form.set_text(FormField::Title, "");

        let err = forms.submit(&mut store).unwrap_err();
        match err {
            Error::Validation(v) => {
                assert!(v.contains(FormField::Title));
                assert!(!v.contains(FormField::Description));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store, before);
        assert!(forms.is_open(DialogKind::Add));
        assert!(forms.active().unwrap().issue_for(FormField::Title).is_some());
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut form = FormState::blank();
        filled(&mut form);
        form.set_text(FormField::Description, "  \n ");
        let err = form.validate().unwrap_err();
        assert_eq!(
            err.issues,
            vec![FieldIssue {
                field: FormField::Description,
                kind: IssueKind::Missing
            }]
        );
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let mut form = FormState::blank();
        filled(&mut form);
        form.set_text(FormField::DueDate, "2024-13-01");
        let err = form.validate().unwrap_err();
        assert_eq!(err.issues[0].kind, IssueKind::InvalidDate);
        assert_eq!(
            err.to_string(),
            "Due Date must be a date in YYYY-MM-DD format"
        );
    }

    #[test]
    fn test_editing_field_clears_its_issue() {
        let mut store = ItemStore::new();
        let mut forms = FormController::new();
        forms.open_add().unwrap();
        assert!(forms.submit(&mut store).is_err());
        let form = forms.active_mut().unwrap();
        assert_eq!(form.issues().len(), 3);
        form.insert_char('T');
        assert!(form.issue_for(FormField::Title).is_none());
        assert_eq!(form.issues().len(), 2);
    }

    #[test]
    fn test_backspace_clears_its_issue() {
        let mut store = ItemStore::new();
        let mut forms = FormController::new();
        let form = forms.open_add().unwrap();
        filled(form);
        form.set_text(FormField::DueDate, "2024-13-01");
        assert!(forms.submit(&mut store).is_err());

        let form = forms.active_mut().unwrap();
        assert!(form.issue_for(FormField::DueDate).is_some());
        form.set_focus(FormField::DueDate);
        form.backspace();
        assert_eq!(form.due_date, "2024-13-0");
        assert!(form.issue_for(FormField::DueDate).is_none());
    }

    #[test]
    fn test_submit_edit_updates_in_place() {
        let mut store = ItemStore::with_sample_items();
        let mut forms = FormController::new();
        let form = forms.open_edit(store.get(2).unwrap()).unwrap();
        form.status = ItemStatus::Completed;

        let submitted = forms.submit(&mut store).unwrap();
        assert!(matches!(submitted, Submitted::Updated(_)));
        assert_eq!(store.items()[1].id, 2);
        assert_eq!(store.items()[1].status, ItemStatus::Completed);
        assert!(!forms.is_open(DialogKind::Edit));
    }

    #[test]
    fn test_submit_edit_missing_target_keeps_dialog() {
        let mut store = ItemStore::with_sample_items();
        let mut forms = FormController::new();
        forms.open_edit(store.get(4).unwrap()).unwrap();

        let mut empty = ItemStore::new();
        let err = forms.submit(&mut empty).unwrap_err();
        assert!(matches!(err, Error::ItemNotFound(4)));
        assert!(forms.is_open(DialogKind::Edit));
        assert!(forms.submit(&mut store).is_ok());
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = FormState::blank();
        form.focus_previous();
        assert_eq!(form.focus(), FormField::DueDate);
        form.focus_next();
        assert_eq!(form.focus(), FormField::Title);
    }

    #[test]
    fn test_cycle_choice_stays_in_option_set() {
        let mut form = FormState::blank();
        form.set_focus(FormField::Status);
        let mut seen = Vec::new();
        for _ in 0..ItemStatus::ALL.len() {
            seen.push(form.status);
            form.cycle_choice(true);
        }
        assert_eq!(seen, ItemStatus::ALL.to_vec());
        form.cycle_choice(false);
        assert_eq!(form.status, ItemStatus::OnHold);

        // Typing into a choice field does nothing
        form.insert_char('z');
        assert_eq!(form.choice_label(FormField::Status), Some("On Hold"));
    }

    #[test]
    fn test_newline_only_in_description() {
        let mut form = FormState::blank();
        form.insert_char('\n');
        assert!(form.title.is_empty());
        form.set_focus(FormField::Description);
        form.insert_char('a');
        form.insert_char('\n');
        form.insert_char('b');
        assert_eq!(form.description, "a\nb");
        form.backspace();
        assert_eq!(form.description, "a\n");
    }
}
