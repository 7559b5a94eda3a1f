//! Terminal User Interface module for the roadmap board
//!
//! This module provides a keyboard-driven board: a filter control, the
//! timeline strip, a grid of item cards, the add/edit dialog and toasts.
//! Everything it shows is read from [`crate::board::Board`].

mod app;
mod keybindings;
mod theme;
mod views;

pub use app::{TuiApp, run_tui};
pub use keybindings::{Action, DialogAction, HistoryAction};
