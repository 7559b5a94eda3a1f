//! TUI Views module
//!
//! Each view draws one region of the board from the shared `Board` state.

pub mod cards;
pub mod dialog;
pub mod header;
pub mod timeline;
pub mod toasts;
