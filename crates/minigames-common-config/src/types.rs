//! Core configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration, read from `minigames.yaml` in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MinigamesConfig {
    /// Message catalog settings.
    pub messages: MessagesConfig,

    /// Logging settings.
    pub log: LogSettings,
}

/// Message catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MessagesConfig {
    /// Messages document, relative to the data directory unless absolute.
    pub file: PathBuf,

    /// Locale used for entries that do not declare one.
    pub default_locale: String,

    /// Persist every template change immediately.
    pub auto_save: bool,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("messages.yml"),
            default_locale: "en".to_string(),
            auto_save: true,
        }
    }
}

/// Logging settings. Environment variables override these at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Level name: trace, debug, info, warn or error.
    pub level: String,

    /// Console output format.
    pub format: LogOutput,

    /// Optional log file, appended to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogOutput::Pretty,
            file: None,
        }
    }
}

/// Console log format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Pretty,
    Compact,
    Json,
}
