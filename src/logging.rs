//! Tracing subscriber setup.
//!
//! CLI commands log to stderr so stdout stays machine-readable. The
//! terminal board owns the screen, so it logs to a rolling file instead.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "ROADMAP_LOG";

/// Set to `1` or `true` for JSON log lines.
pub const LOG_JSON_ENV: &str = "ROADMAP_LOG_JSON";

const DEFAULT_DIRECTIVE: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn log_json() -> bool {
    std::env::var(LOG_JSON_ENV)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Install the stderr subscriber used by CLI commands.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_cli() {
    let filter = env_filter();
    // try_init fails only when a subscriber is already installed
    if log_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}

/// Directory holding the board's log files.
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("roadmap").join("logs"))
}

/// Install a file subscriber for the terminal board.
///
/// The returned guard flushes buffered lines when dropped, so keep it alive
/// for as long as the board runs. Returns `None` when no data directory is
/// available; logging is then disabled.
#[cfg(feature = "tui")]
pub fn init_tui() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = log_dir()?;
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, "roadmap.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .ok();

    Some(guard)
}
