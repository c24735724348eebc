//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Variables that would make locale detection or logging depend on the host.
const HOST_VARS: [&str; 8] = [
    "MINIGAMES_LOCALE",
    "LC_ALL",
    "LC_MESSAGES",
    "LANG",
    "RUST_LOG",
    "MINIGAMES_LOG_LEVEL",
    "MINIGAMES_LOG_FORMAT",
    "MINIGAMES_LOG_FILE",
];

/// Test context with a temporary data directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `minigames.yaml`
    pub fn with_config(self, config: &str) -> Self {
        std::fs::write(self.path().join("minigames.yaml"), config).expect("Failed to write config");
        self
    }

    /// Write the messages document
    pub fn with_messages(self, messages: &str) -> Self {
        std::fs::write(self.messages_path(), messages).expect("Failed to write messages");
        self
    }

    /// Get path to the data directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default messages document path
    pub fn messages_path(&self) -> PathBuf {
        self.path().join("messages.yml")
    }

    /// Current messages document
    pub fn messages(&self) -> String {
        std::fs::read_to_string(self.messages_path()).expect("Failed to read messages")
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("mgmsg").expect("Binary not found");
        cmd.current_dir(self.path())
            .env("MINIGAMES_DATA_DIR", self.path())
            .env("NO_COLOR", "1");
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run a command that must succeed and return its stdout
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run mgmsg");
        assert!(
            output.status.success(),
            "mgmsg {:?} failed with {}\nstderr: {}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout is not UTF-8")
    }

    /// Run a command with `--format json` and parse its stdout
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        serde_json::from_str(&self.stdout(&full)).expect("Failed to parse JSON output")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
