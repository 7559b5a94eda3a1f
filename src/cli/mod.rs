//! CLI argument definitions for the roadmap board.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Version with the commit and build time injected by build.rs.
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ROADMAP_GIT_COMMIT"),
    ", built ",
    env!("ROADMAP_BUILD_TIMESTAMP"),
    ")"
);

/// Roadmap - plan features and fixes on a timeline.
///
/// Run without a command to open the interactive board.
#[derive(Parser, Debug)]
#[command(name = "roadmap")]
#[command(author, version, long_version = LONG_VERSION, long_about = None)]
#[command(about = "A roadmap board for planning features and fixes on a timeline")]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Snapshot file holding the board's items.
    /// Can also be set via ROADMAP_BOARD environment variable.
    #[arg(long = "board", global = true)]
    pub board: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/roadmap/config.kdl).
    /// Can also be set via ROADMAP_CONFIG environment variable.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items, optionally filtered by type
    List {
        /// Type filter: all, kaf, feature (defaults to the configured filter)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show one item's card
    Show {
        /// Item ID
        id: u64,
    },

    /// Draw the timeline of visible items
    Timeline {
        /// Type filter: all, kaf, feature (defaults to the configured filter)
        #[arg(short, long)]
        filter: Option<String>,

        /// Width of the drawn strip in columns
        #[arg(short, long, default_value = "72")]
        width: u16,
    },

    /// Add a new roadmap item
    Add {
        /// Item title
        #[arg(short, long)]
        title: String,

        /// Item description (Markdown)
        #[arg(short, long)]
        description: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Item type: feature, kaf
        #[arg(long = "type", short = 'T', default_value = "feature")]
        item_type: String,

        /// Status: planned, in-progress, completed, on-hold
        #[arg(short, long, default_value = "planned")]
        status: String,

        /// Priority: low, medium, high
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// Edit an existing roadmap item
    Edit {
        /// Item ID
        id: u64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description (Markdown)
        #[arg(short, long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// New type: feature, kaf
        #[arg(long = "type", short = 'T')]
        item_type: Option<String>,

        /// New status: planned, in-progress, completed, on-hold
        #[arg(short, long)]
        status: Option<String>,

        /// New priority: low, medium, high
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Open the interactive terminal board
    Tui,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration and where each value came from
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_defaults() {
        let cli = Cli::parse_from([
            "roadmap",
            "add",
            "--title",
            "X",
            "--description",
            "d",
            "--due",
            "2024-05-01",
        ]);
        match cli.command {
            Some(Commands::Add {
                item_type,
                status,
                priority,
                ..
            }) => {
                assert_eq!(item_type, "feature");
                assert_eq!(status, "planned");
                assert_eq!(priority, "medium");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["roadmap", "list", "-H", "--board", "b.json"]);
        assert!(cli.human_readable);
        assert_eq!(cli.board, Some(PathBuf::from("b.json")));
    }

    #[test]
    fn test_no_command_means_board() {
        let cli = Cli::parse_from(["roadmap"]);
        assert!(cli.command.is_none());
    }
}
