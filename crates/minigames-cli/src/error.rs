//! CLI error handling and formatting.

use std::process::ExitCode;

use minigames_common_config::{ConfigError, EnvError};
use minigames_common_i18n::MessageError;
use thiserror::Error;

/// Application exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    StorageError = 3,
    NotFound = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// CLI error type with context for the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Messages {
        message: String,
        #[source]
        source: MessageError,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Messages { .. } => "E002",
            Self::NotFound { .. } => "E005",
            Self::User { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    /// Exit status category of this error.
    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Messages { .. } => Exit::StorageError,
            Self::NotFound { .. } => Exit::NotFound,
            Self::User { .. } | Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::User { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Text written to stderr before exiting.
    pub fn render(&self) -> String {
        let mut out = format!("error[{}]: {self}", self.code());
        if let Some(hint) = self.hint() {
            out.push_str(&format!("\n  hint: {hint}"));
        }
        if !self.suggestions().is_empty() {
            out.push_str("\n  did you mean:");
            for suggestion in self.suggestions() {
                out.push_str(&format!("\n    {suggestion}"));
            }
        }
        out
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check minigames.yaml in the data directory".to_string()),
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        Self::Config {
            message: format!("Environment error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check the .env file in the data directory".to_string()),
        }
    }
}

impl From<MessageError> for CliError {
    fn from(err: MessageError) -> Self {
        Self::Messages {
            message: format!("Messages error: {err}"),
            source: err,
        }
    }
}
