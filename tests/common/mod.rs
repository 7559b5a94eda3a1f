//! Common test utilities for roadmap integration tests.
//!
//! Provides `TestEnv` for isolated test environments that never read the
//! user's `~/.config/roadmap/config.kdl` or write to a real board file.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with an isolated config and snapshot file.
///
/// The `roadmap()` method returns a `Command` that points `ROADMAP_CONFIG`
/// and `--board` into the temp directory per-invocation, making tests
/// parallel-safe.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Create an environment whose config.kdl holds `config`.
    pub fn with_config(config: &str) -> Self {
        let env = Self::new();
        std::fs::write(env.config_path(), config).unwrap();
        env
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.kdl")
    }

    pub fn board_path(&self) -> PathBuf {
        self.dir.path().join("board.json")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Command for the roadmap binary without a board file.
    pub fn roadmap_in_memory(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_roadmap"));
        cmd.current_dir(self.dir.path());
        cmd.env("ROADMAP_CONFIG", self.config_path());
        cmd.env_remove("ROADMAP_BOARD");
        cmd.env_remove("ROADMAP_LOG");
        cmd
    }

    /// Command for the roadmap binary using this environment's board file.
    pub fn roadmap(&self) -> Command {
        let mut cmd = self.roadmap_in_memory();
        cmd.arg("--board").arg(self.board_path());
        cmd
    }

    /// Items currently stored in the board file.
    pub fn stored_items(&self) -> Vec<serde_json::Value> {
        let content = std::fs::read_to_string(self.board_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a command's stdout as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
