//! TUI Application - main event loop and terminal management
//!
//! This module contains the core TUI application logic including:
//! - Terminal setup and restoration
//! - Routing keys to the board, the open dialog, or the history overlay
//! - Writing the board back to its snapshot on exit

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{error, info, warn};

use super::keybindings::{
    Action, DialogAction, HistoryAction, dialog_action, history_action, normal_mode_action,
};
use super::views::{cards, dialog, header, timeline, toasts};
use crate::board::Board;
use crate::commands::Workspace;
use crate::{Error, Result};

/// How long to wait for a key before redrawing (toast expiry).
const TICK: Duration = Duration::from_millis(100);

/// TUI Application state
pub struct TuiApp {
    workspace: Workspace,
    /// Whether to quit the application
    should_quit: bool,
}

impl TuiApp {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            should_quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        self.workspace.board()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn into_workspace(self) -> Workspace {
        self.workspace
    }

    /// Expire old toasts.
    pub fn tick(&mut self) {
        self.workspace.board_mut().notifications_mut().cleanup();
    }

    /// Handle keyboard events
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let board = self.workspace.board_mut();

        if board.notifications().history_visible {
            if let Some(action) = history_action(code) {
                let notifications = board.notifications_mut();
                match action {
                    HistoryAction::Close => notifications.close_history(),
                    HistoryAction::Next => notifications.history_next(),
                    HistoryAction::Previous => notifications.history_previous(),
                    HistoryAction::Clear => notifications.clear_history(),
                }
            }
            return;
        }

        if let Some(focus) = board.form().map(|form| form.focus()) {
            if let Some(action) = dialog_action(code, modifiers, focus) {
                self.handle_dialog(action);
            }
            return;
        }

        if let Some(action) = normal_mode_action(code) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        let board = self.workspace.board_mut();
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveDown => board.select_next(),
            Action::MoveUp => board.select_previous(),
            Action::First => board.select_first(),
            Action::Last => board.select_last(),
            Action::CycleFilter => board.cycle_filter(),
            Action::SetFilter(filter) => board.set_filter(filter),
            Action::Add => {
                let opened = board.open_add().map(|_| ());
                if let Err(e) = opened {
                    warn!(error = %e, "could not open add dialog");
                    board.notifications_mut().warning("Cannot add item", e.to_string());
                }
            }
            Action::Edit => match board.edit_selected() {
                Ok(Some(_)) => {}
                Ok(None) => board
                    .notifications_mut()
                    .info("Nothing selected", "There is no item to edit."),
                Err(e) => {
                    warn!(error = %e, "could not open edit dialog");
                    board.notifications_mut().warning("Cannot edit item", e.to_string());
                }
            },
            Action::ToggleHistory => board.notifications_mut().toggle_history(),
            Action::DismissToast => board.notifications_mut().dismiss_oldest(),
        }
    }

    fn handle_dialog(&mut self, action: DialogAction) {
        let board = self.workspace.board_mut();
        match action {
            DialogAction::Submit => match board.submit_dialog() {
                Ok(_) => {
                    if let Err(e) = self.workspace.save() {
                        error!(error = %e, "failed to save board");
                        self.workspace
                            .board_mut()
                            .notifications_mut()
                            .error("Save failed", e.to_string());
                    }
                }
                // Shown inline next to the fields
                Err(Error::Validation(_)) => {}
                // Already raised as a toast by the board
                Err(Error::ItemNotFound(_)) => {}
                Err(e) => board.notifications_mut().error("Submit failed", e.to_string()),
            },
            DialogAction::Cancel => {
                let _ = board.cancel_dialog();
            }
            other => {
                if let Some(form) = board.form_mut() {
                    match other {
                        DialogAction::FocusNext => form.focus_next(),
                        DialogAction::FocusPrevious => form.focus_previous(),
                        DialogAction::ChoiceNext => form.cycle_choice(true),
                        DialogAction::ChoicePrevious => form.cycle_choice(false),
                        DialogAction::Insert(c) => form.insert_char(c),
                        DialogAction::Backspace => form.backspace(),
                        DialogAction::Submit | DialogAction::Cancel => {}
                    }
                }
            }
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let board = self.board();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Header
                Constraint::Length(timeline::HEIGHT), // Timeline strip
                Constraint::Min(cards::CARD_HEIGHT),  // Cards
                Constraint::Length(1),               // Status bar
            ])
            .split(area);

        header::render(frame, chunks[0], board);
        timeline::render(frame, chunks[1], board);
        cards::render(frame, chunks[2], board);
        self.render_status_bar(frame, chunks[3]);

        if let Some(form) = board.form() {
            dialog::render(frame, area, form);
        }
        toasts::render_toasts(frame, area, board.notifications());
        if board.notifications().history_visible {
            toasts::render_history(frame, area, board.notifications());
        }
    }

    /// Render the status bar with keybindings
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.board().form().is_some() {
            " Tab/↑/↓:Field  ←/→:Choice  Ctrl+S:Submit  Esc:Cancel"
        } else {
            " j/k:Move  f/1-3:Filter  a:Add  e:Edit  n:History  x:Dismiss  q:Quit"
        };
        let status = Paragraph::new(hints)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(status, area);
    }
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> io::Result<()> {
    while !app.should_quit() {
        app.tick();
        terminal.draw(|f| app.render(f))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }
    }
    Ok(())
}

/// Run the interactive board until the user quits.
///
/// The board is written back to its snapshot file, if one is configured,
/// after the terminal has been restored.
pub fn run_tui(workspace: Workspace) -> Result<()> {
    let mut app = TuiApp::new(workspace);
    info!("starting board");

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app);
    restore_terminal()?;
    result?;

    let workspace = app.into_workspace();
    if workspace.save()? {
        info!("board saved on exit");
    }
    Ok(())
}
