//! Roadmap CLI - plan features and fixes on a timeline.

use std::process;

use clap::Parser;
use roadmap::cli::{Cli, Commands, ConfigCommands};
use roadmap::commands::{self, ItemFields, Output, Workspace};
use roadmap::config::{ConfigOverrides, OutputFormat, ResolvedConfig, resolve_config};
use tracing::debug;

fn main() {
    let cli = Cli::parse();

    let mut overrides = ConfigOverrides::new();
    if let Some(path) = cli.config {
        overrides = overrides.with_config_path(path);
    }
    if let Some(path) = cli.board {
        overrides = overrides.with_board(path);
    }
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }

    // The board logs to a file; everything else logs to stderr
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    if !interactive {
        roadmap::logging::init_cli();
    }

    let config = match resolve_config(&overrides) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, cli.human_readable),
    };
    let human = config.output_format() == OutputFormat::Human;

    if let Err(e) = run_command(cli.command, &config, human) {
        exit_with_error(&e, human);
    }
}

fn exit_with_error(e: &roadmap::Error, human: bool) -> ! {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    }
    process::exit(1);
}

fn run_command(
    command: Option<Commands>,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), roadmap::Error> {
    debug!(?command, "running command");

    match command {
        None | Some(Commands::Tui) => run_tui(config)?,

        Some(Commands::List { filter }) => {
            let mut workspace = Workspace::open(config)?;
            let result = commands::list(&mut workspace, filter.as_deref())?;
            output(&result, human);
        }

        Some(Commands::Show { id }) => {
            let workspace = Workspace::open(config)?;
            let result = commands::show(&workspace, id)?;
            output(&result, human);
        }

        Some(Commands::Timeline { filter, width }) => {
            let mut workspace = Workspace::open(config)?;
            let result = commands::timeline(&mut workspace, filter.as_deref(), width)?;
            output(&result, human);
        }

        Some(Commands::Add {
            title,
            description,
            due,
            item_type,
            status,
            priority,
        }) => {
            let mut workspace = Workspace::open(config)?;
            let fields = ItemFields {
                title: Some(title),
                description: Some(description),
                due: Some(due),
                item_type: Some(item_type),
                status: Some(status),
                priority: Some(priority),
            };
            let result = commands::add(&mut workspace, fields)?;
            output(&result, human);
        }

        Some(Commands::Edit {
            id,
            title,
            description,
            due,
            item_type,
            status,
            priority,
        }) => {
            let mut workspace = Workspace::open(config)?;
            let fields = ItemFields {
                title,
                description,
                due,
                item_type,
                status,
                priority,
            };
            let result = commands::edit(&mut workspace, id, fields)?;
            output(&result, human);
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => output(&commands::config_show(config), human),
        },
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

#[cfg(feature = "tui")]
fn run_tui(config: &ResolvedConfig) -> Result<(), roadmap::Error> {
    let _guard = roadmap::logging::init_tui();
    let workspace = Workspace::open(config)?;
    roadmap::tui::run_tui(workspace)
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &ResolvedConfig) -> Result<(), roadmap::Error> {
    Err(roadmap::Error::InvalidInput(
        "the terminal board is not available in this build (enable the `tui` feature)".to_string(),
    ))
}
