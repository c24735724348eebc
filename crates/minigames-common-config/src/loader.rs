//! Configuration file loading and parsing.

use crate::types::MinigamesConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// File name of the configuration inside the data directory.
pub const CONFIG_FILE: &str = "minigames.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader for one data directory.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    data_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of `minigames.yaml`.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Load configuration; defaults if the file does not exist.
    pub fn load(&self) -> Result<MinigamesConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(MinigamesConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let expanded = expand_env_vars(&contents)?;

        let config: MinigamesConfig = if expanded.trim().is_empty() {
            MinigamesConfig::default()
        } else {
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?
        };

        validate(&config)?;
        Ok(config)
    }

    /// Save configuration to `minigames.yaml`.
    pub fn save(&self, config: &MinigamesConfig) -> Result<(), ConfigError> {
        validate(config)?;
        std::fs::create_dir_all(&self.data_dir)?;

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(self.config_path(), yaml)?;
        Ok(())
    }

    /// The messages document, resolved against the data directory.
    pub fn messages_path(&self, config: &MinigamesConfig) -> PathBuf {
        if config.messages.file.is_absolute() {
            config.messages.file.clone()
        } else {
            self.data_dir.join(&config.messages.file)
        }
    }
}

fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("environment pattern is valid")
    })
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(content.len());
    let mut last = 0;

    for cap in env_pattern().captures_iter(content) {
        let Some(full) = cap.get(0) else { continue };
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match default {
                Some(d) => d.to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result.push_str(&content[last..full.start()]);
        result.push_str(&value);
        last = full.end();
    }

    result.push_str(&content[last..]);
    Ok(result)
}

/// Validate configuration values.
fn validate(config: &MinigamesConfig) -> Result<(), ConfigError> {
    if config.messages.default_locale.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "messages.default_locale must not be empty".to_string(),
        });
    }

    if config.messages.file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "messages.file must not be empty".to_string(),
        });
    }

    Ok(())
}
