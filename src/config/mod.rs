//! Configuration for the roadmap board.
//!
//! ## config.kdl - User preferences
//!
//! Located at (first match wins):
//! - `--config <path>`
//! - `ROADMAP_CONFIG` environment variable
//! - `~/.config/roadmap/config.kdl`
//!
//! Contains:
//! - `board` - Snapshot file holding the items
//! - `default-filter` - "all", "kaf" or "feature"
//! - `date-format` - strftime pattern for timeline labels
//! - `toast-seconds` - Toast auto-dismiss delay (1-60)
//! - `output-format` - "json" or "human"
//!
//! ## Precedence
//!
//! CLI flag > environment > config.kdl > defaults
//!
//! Use the [`resolver`] module for unified precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    BOARD_ENV, CONFIG_ENV, ConfigOverrides, Resolved, ResolvedConfig, ValueSource,
    load_config_file, resolve_config,
};
pub use schema::{BoardConfig, OutputFormat};
