//! Durable storage of the messages document.

use crate::StorageError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Where the messages document lives.
///
/// Implementations deal in whole documents; the store never writes partial
/// content.
pub trait MessageStorage: Send + Sync {
    /// Read the document, or `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the document.
    fn write(&self, contents: &str) -> Result<(), StorageError>;

    /// Human readable location, for logs.
    fn describe(&self) -> String;
}

/// A YAML file on disk, usually `messages.yml` in the data directory.
#[derive(Debug, Clone)]
pub struct YamlFileStorage {
    path: PathBuf,
}

impl YamlFileStorage {
    /// Storage backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MessageStorage for YamlFileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "messages file does not exist yet");
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        write_atomic(&self.path, contents.as_bytes())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write to a temporary sibling file, then rename over the target.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let write_error = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut temp_path = path.to_path_buf();
    match path.file_name() {
        Some(name) => temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy())),
        None => temp_path.push(".tmp"),
    }

    {
        let mut file = File::create(&temp_path).map_err(write_error)?;
        file.write_all(contents).map_err(write_error)?;
        file.sync_all().map_err(write_error)?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_error(e)
    })
}

/// Document held in memory; for tests and hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }

    /// Current document.
    pub fn contents(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a complete document.
        self.contents.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MessageStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock().clone())
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        *self.lock() = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
