//! Keybinding definitions

use crossterm::event::{KeyCode, KeyModifiers};

use crate::board::{FormField, TypeFilter};

/// Action on the board itself (no dialog open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Move selection down
    MoveDown,
    /// Move selection up
    MoveUp,
    /// Jump to the first card
    First,
    /// Jump to the last card
    Last,
    /// All Items -> KAF -> Features -> All Items
    CycleFilter,
    /// Pick a filter directly
    SetFilter(TypeFilter),
    /// Open the add dialog
    Add,
    /// Edit the selected card
    Edit,
    /// Toggle notification history
    ToggleHistory,
    /// Dismiss the oldest toast
    DismissToast,
}

/// Get the action for a key in normal mode
pub fn normal_mode_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::First),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Last),
        KeyCode::Char('f') => Some(Action::CycleFilter),
        KeyCode::Char('1') => Some(Action::SetFilter(TypeFilter::All)),
        KeyCode::Char('2') => Some(Action::SetFilter(TypeFilter::Kaf)),
        KeyCode::Char('3') => Some(Action::SetFilter(TypeFilter::Feature)),
        KeyCode::Char('a') | KeyCode::Char('+') => Some(Action::Add),
        KeyCode::Char('e') | KeyCode::Enter => Some(Action::Edit),
        KeyCode::Char('n') => Some(Action::ToggleHistory),
        KeyCode::Char('x') => Some(Action::DismissToast),
        _ => None,
    }
}

/// Action inside an open add/edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    FocusNext,
    FocusPrevious,
    ChoiceNext,
    ChoicePrevious,
    Insert(char),
    Backspace,
    Submit,
    Cancel,
}

/// Get the action for a key while a dialog is open.
///
/// `Enter` starts a new line in multi-line fields and submits elsewhere.
pub fn dialog_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    focus: FormField,
) -> Option<DialogAction> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('s') => Some(DialogAction::Submit),
            _ => None,
        };
    }
    match code {
        KeyCode::Esc => Some(DialogAction::Cancel),
        KeyCode::Tab | KeyCode::Down => Some(DialogAction::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(DialogAction::FocusPrevious),
        KeyCode::Right if !focus.is_text() => Some(DialogAction::ChoiceNext),
        KeyCode::Left if !focus.is_text() => Some(DialogAction::ChoicePrevious),
        KeyCode::Char(' ') if !focus.is_text() => Some(DialogAction::ChoiceNext),
        KeyCode::Enter if focus.is_multiline() => Some(DialogAction::Insert('\n')),
        KeyCode::Enter => Some(DialogAction::Submit),
        KeyCode::Backspace if focus.is_text() => Some(DialogAction::Backspace),
        KeyCode::Char(c) if focus.is_text() => Some(DialogAction::Insert(c)),
        _ => None,
    }
}

/// Action while the notification history overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Close,
    Next,
    Previous,
    Clear,
}

pub fn history_action(code: KeyCode) -> Option<HistoryAction> {
    match code {
        KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => Some(HistoryAction::Close),
        KeyCode::Char('j') | KeyCode::Down => Some(HistoryAction::Next),
        KeyCode::Char('k') | KeyCode::Up => Some(HistoryAction::Previous),
        KeyCode::Char('c') => Some(HistoryAction::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_filters() {
        assert_eq!(
            normal_mode_action(KeyCode::Char('2')),
            Some(Action::SetFilter(TypeFilter::Kaf))
        );
        assert_eq!(normal_mode_action(KeyCode::Char('+')), Some(Action::Add));
        assert_eq!(normal_mode_action(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_enter_depends_on_focus() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            dialog_action(KeyCode::Enter, none, FormField::Description),
            Some(DialogAction::Insert('\n'))
        );
        assert_eq!(
            dialog_action(KeyCode::Enter, none, FormField::Title),
            Some(DialogAction::Submit)
        );
        assert_eq!(
            dialog_action(KeyCode::Char('s'), KeyModifiers::CONTROL, FormField::Description),
            Some(DialogAction::Submit)
        );
    }

    #[test]
    fn test_typing_only_in_text_fields() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            dialog_action(KeyCode::Char('x'), none, FormField::Title),
            Some(DialogAction::Insert('x'))
        );
        assert_eq!(dialog_action(KeyCode::Char('x'), none, FormField::Status), None);
        assert_eq!(
            dialog_action(KeyCode::Right, none, FormField::Priority),
            Some(DialogAction::ChoiceNext)
        );
    }
}
