//! Precedence resolution for configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Environment variables (`ROADMAP_BOARD`)
//! 3. config.kdl
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kdl::KdlDocument;
use tracing::debug;

use crate::board::TypeFilter;
use crate::board::notifications::DEFAULT_DISMISS_SECONDS;
use crate::config::{BoardConfig, OutputFormat};
use crate::render::timeline::DEFAULT_DATE_FORMAT;
use crate::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ROADMAP_CONFIG";

/// Environment variable naming the board snapshot file.
pub const BOARD_ENV: &str = "ROADMAP_BOARD";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    ConfigFile,
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "file"),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Config file consulted, whether or not it existed
    pub config_path: Option<PathBuf>,
    /// Snapshot file, if any
    pub board: Option<Resolved<PathBuf>>,
    pub default_filter: Resolved<TypeFilter>,
    pub date_format: Resolved<String>,
    pub toast_seconds: Resolved<u64>,
    pub output_format: Resolved<OutputFormat>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            board: None,
            default_filter: Resolved::new(TypeFilter::All, ValueSource::Default),
            date_format: Resolved::new(DEFAULT_DATE_FORMAT.to_string(), ValueSource::Default),
            toast_seconds: Resolved::new(DEFAULT_DISMISS_SECONDS, ValueSource::Default),
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
        }
    }
}

impl ResolvedConfig {
    pub fn board_path(&self) -> Option<&Path> {
        self.board.as_ref().map(|r| r.value.as_path())
    }

    pub fn default_filter(&self) -> TypeFilter {
        self.default_filter.value
    }

    pub fn date_format(&self) -> &str {
        &self.date_format.value
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds.value)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file (`--config`)
    pub config_path: Option<PathBuf>,
    /// Snapshot file (`--board`)
    pub board: Option<PathBuf>,
    /// `-H` forces human output
    pub output_format: Option<OutputFormat>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_board(mut self, path: impl Into<PathBuf>) -> Self {
        self.board = Some(path.into());
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }
}

/// Default config location (`~/.config/roadmap/config.kdl`).
pub fn system_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("roadmap").join("config.kdl"))
}

/// Load config.kdl. A missing file is an empty config.
pub fn load_config_file(path: &Path) -> Result<BoardConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(BoardConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let doc: KdlDocument = content.parse().map_err(|e| {
        Error::Config(format!("Failed to parse KDL in {}: {}", path.display(), e))
    })?;
    BoardConfig::from_kdl(&doc).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Resolve configuration with full precedence chain.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let config_path = overrides
        .config_path
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(system_config_path);

    let file_config = match config_path {
        Some(ref path) => load_config_file(path)?,
        None => BoardConfig::default(),
    };

    let env_board = std::env::var_os(BOARD_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    resolve_with(overrides, env_board, file_config, config_path)
}

/// Resolve from already-loaded sources.
pub fn resolve_with(
    overrides: &ConfigOverrides,
    env_board: Option<PathBuf>,
    file_config: BoardConfig,
    config_path: Option<PathBuf>,
) -> Result<ResolvedConfig> {
    let mut result = ResolvedConfig {
        config_path,
        ..ResolvedConfig::default()
    };

    // Resolve board
    if let Some(ref board) = overrides.board {
        result.board = Some(Resolved::new(board.clone(), ValueSource::CliFlag));
    } else if let Some(board) = env_board {
        result.board = Some(Resolved::new(
            board,
            ValueSource::EnvVar(BOARD_ENV.to_string()),
        ));
    } else if let Some(board) = file_config.board {
        result.board = Some(Resolved::new(board, ValueSource::ConfigFile));
    }
    // else: no snapshot, board lives in memory only

    if let Some(filter) = file_config.default_filter {
        result.default_filter = Resolved::new(filter, ValueSource::ConfigFile);
    }

    if let Some(pattern) = file_config.date_format {
        result.date_format = Resolved::new(pattern, ValueSource::ConfigFile);
    }

    if let Some(seconds) = file_config.toast_seconds {
        result.toast_seconds = Resolved::new(seconds, ValueSource::ConfigFile);
    }

    // Resolve output_format
    if let Some(format) = overrides.output_format {
        result.output_format = Resolved::new(format, ValueSource::CliFlag);
    } else if let Some(format) = file_config.output_format {
        result.output_format = Resolved::new(format, ValueSource::ConfigFile);
    }

    Ok(result)
}
