//! Localized messages for Minigames.
//!
//! Messages are stored per key, per locale and per channel (player-facing
//! "user" text and operator-facing "admin" text) in a YAML document that
//! operators can edit. Feature modules declare the messages they ship in a
//! [`MessageDefaults`] table; [`MessageStore::load`] seeds whatever the
//! document is missing and writes it back. [`MessageResolver`] walks the
//! locale fallback chain and fills in placeholders.
//!
//! ```no_run
//! use std::sync::Arc;
//! use minigames_common_i18n::{
//!     Locale, MessageDefaults, MessageKey, MessageResolver, MessageStore, YamlFileStorage,
//! };
//!
//! let mut defaults = MessageDefaults::new();
//! defaults.namespace("arena", "en").multi("Welcome", &["Welcome to %s!"]);
//!
//! let store = Arc::new(MessageStore::new(YamlFileStorage::new("messages.yml"), defaults));
//! store.load()?;
//!
//! let resolver = MessageResolver::new(store);
//! let lines = resolver.resolve_user(
//!     &MessageKey::new("arena", "Welcome"),
//!     &Locale::new("de"),
//!     &["Lava Pit".into()],
//! )?;
//! # Ok::<(), minigames_common_i18n::MessageError>(())
//! ```

pub mod catalog;
pub mod declare;
pub mod detect;
pub mod entry;
pub mod format;
pub mod key;
pub mod locale;
pub mod resolve;
pub mod storage;
pub mod store;

use std::path::PathBuf;

pub use catalog::MessageCatalog;
pub use declare::{MessageDeclaration, MessageDefaults, MessageShape, NamespaceBuilder};
pub use detect::{detect_locale, detect_locale_from};
pub use entry::{Channel, MessageEntry};
pub use format::{format_template, ArgumentFormatter, MessageArg, NumberStyle, PlainArguments};
pub use key::MessageKey;
pub use locale::Locale;
pub use resolve::MessageResolver;
pub use storage::{MemoryStorage, MessageStorage, YamlFileStorage};
pub use store::{LoadReport, MessageStore};

/// Durable storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    Parse { line: Option<usize>, message: String },

    #[error("failed to serialize messages: {0}")]
    Serialize(String),
}

/// Message store and resolver errors.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The accessor does not match the declared shape. This is a programming
    /// error in the caller.
    #[error("message {key} is {actual}, not {expected}")]
    ShapeMismatch {
        key: MessageKey,
        expected: MessageShape,
        actual: MessageShape,
    },
}
