//! Environment variable handling.

use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable names.
pub mod vars {
    pub const MINIGAMES_DATA_DIR: &str = "MINIGAMES_DATA_DIR";
}

/// Environment errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment loader.
pub struct Environment;

impl Environment {
    /// Load `.env` from the data directory if present.
    pub fn init_in(data_dir: &Path) -> Result<(), EnvError> {
        match dotenvy::from_path(data_dir.join(".env")) {
            Ok(()) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Get an environment variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }

    /// Data directory from `MINIGAMES_DATA_DIR`, else the current directory.
    pub fn data_dir() -> PathBuf {
        Self::get(vars::MINIGAMES_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| env::current_dir().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minigames_test_utils::{assert_ok, temp_dir};

    #[test]
    fn test_dotenv_in_data_dir() {
        let dir = temp_dir();
        std::fs::write(dir.path().join(".env"), "MINIGAMES_TEST_DOTENV=from_dotenv\n").unwrap();
        env::remove_var("MINIGAMES_TEST_DOTENV");

        assert_ok!(Environment::init_in(dir.path()));
        assert_eq!(Environment::get("MINIGAMES_TEST_DOTENV").as_deref(), Some("from_dotenv"));
        env::remove_var("MINIGAMES_TEST_DOTENV");
    }

    #[test]
    fn test_missing_dotenv_is_ok() {
        let dir = temp_dir();
        assert_ok!(Environment::init_in(dir.path()));
    }
}
