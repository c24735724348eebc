//! Test utilities for Minigames crates.

use std::path::PathBuf;
use tempfile::TempDir;

/// A messages document in the persisted layout, covering both channels,
/// a scalar leaf and an entry without `default_locale`.
pub const SAMPLE_MESSAGES_YAML: &str = r#"arena:
  Welcome:
    default_locale: en
    user:
      en:
        - "Welcome to %s!"
      de:
        - "Willkommen in %s!"
    admin:
      en:
        - "Arena %s (%d players)"
  Full:
    default_locale: en
    user:
      en: "The arena is full."
signs:
  Line1:
    user:
      fr:
        - "Rejoindre"
"#;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given content.
pub fn temp_file(content: &str) -> (TempDir, PathBuf) {
    temp_file_named("test_file", content)
}

/// Creates a temporary file with a chosen name, e.g. `messages.yml`.
pub fn temp_file_named(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
