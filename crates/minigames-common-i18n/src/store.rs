//! Durable, mutable message storage seeded with built-in defaults.

use crate::catalog::MessageCatalog;
use crate::declare::{MessageDefaults, MessageShape};
use crate::entry::{Channel, MessageEntry};
use crate::storage::MessageStorage;
use crate::{Locale, MessageError, MessageKey, StorageError};
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Outcome of [`MessageStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Entries in the catalog after loading.
    pub entries: usize,
    /// Default template sequences that were missing and got seeded.
    pub defaults_added: usize,
    /// Whether seeded defaults were written back.
    pub persisted: bool,
}

/// Owns every message entry of the process.
///
/// The catalog is replaced as a whole on each change, so readers holding a
/// [`snapshot`](Self::snapshot) never see a half-applied update. Share the
/// store between components with an `Arc`.
pub struct MessageStore {
    storage: Box<dyn MessageStorage>,
    defaults: MessageDefaults,
    default_locale: Locale,
    auto_save: bool,
    catalog: RwLock<Arc<MessageCatalog>>,
}

impl MessageStore {
    /// Create an empty store. Nothing is read until [`load`](Self::load).
    pub fn new(storage: impl MessageStorage + 'static, defaults: MessageDefaults) -> Self {
        Self {
            storage: Box::new(storage),
            defaults,
            default_locale: Locale::default(),
            auto_save: false,
            catalog: RwLock::new(Arc::new(MessageCatalog::new())),
        }
    }

    /// Default locale for entries that are neither declared nor name one.
    pub fn with_default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Write the document after every template change.
    pub fn with_auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }

    /// The registered declarations.
    pub fn defaults(&self) -> &MessageDefaults {
        &self.defaults
    }

    /// Current catalog contents.
    pub fn snapshot(&self) -> Arc<MessageCatalog> {
        Arc::clone(&*self.read_lock())
    }

    /// Copy of one entry.
    pub fn entry(&self, key: &MessageKey) -> Option<MessageEntry> {
        self.read_lock().get(key).cloned()
    }

    /// Accessor shape of a key.
    pub fn shape(&self, key: &MessageKey) -> MessageShape {
        self.defaults.shape(key)
    }

    /// Persisted keys that no declaration names any more.
    pub fn orphaned_keys(&self) -> Vec<MessageKey> {
        self.read_lock()
            .keys()
            .filter(|key| !self.defaults.contains(key))
            .cloned()
            .collect()
    }

    /// Read the persisted document and seed missing defaults.
    ///
    /// Existing values are never overwritten. When defaults were added the
    /// document is written back; a failure of that write is logged and
    /// reported in [`LoadReport::persisted`], the loaded catalog stays in use.
    /// A read or parse failure leaves the current catalog untouched.
    pub fn load(&self) -> Result<LoadReport, MessageError> {
        let text = self.storage.read().map_err(|e| self.storage_failed("read", e))?;

        let mut catalog = match text {
            Some(text) => MessageCatalog::from_yaml(&text, |key| self.entry_locale(key))
                .map_err(|e| self.storage_failed("parse", e))?,
            None => MessageCatalog::new(),
        };
        let defaults_added = catalog.merge_defaults(&self.defaults);
        let entries = catalog.len();
        let catalog = Arc::new(catalog);
        *self.write_lock() = Arc::clone(&catalog);

        let persisted = if defaults_added > 0 {
            match self.write_catalog(&catalog) {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        location = %self.storage.describe(),
                        error = %e,
                        "cannot save messages configuration"
                    );
                    false
                }
            }
        } else {
            false
        };

        info!(
            location = %self.storage.describe(),
            entries,
            defaults_added,
            "messages loaded"
        );
        Ok(LoadReport {
            entries,
            defaults_added,
            persisted,
        })
    }

    /// Write the whole catalog. The in-memory state is unaffected by failure.
    pub fn save(&self) -> Result<(), MessageError> {
        let catalog = self.snapshot();
        self.write_catalog(&catalog)
            .map_err(|e| self.storage_failed("write", e))?;
        info!(location = %self.storage.describe(), entries = catalog.len(), "messages saved");
        Ok(())
    }

    /// Replace the user templates of `key` at `locale`; `None` removes them.
    ///
    /// With auto-save on, a failed write restores the previous catalog and
    /// returns the storage error.
    pub fn set_user_templates(
        &self,
        key: &MessageKey,
        locale: impl Into<Locale>,
        lines: Option<Vec<String>>,
    ) -> Result<(), MessageError> {
        self.set_templates(key, Channel::User, locale.into(), lines)
    }

    /// Replace the admin templates of `key` at `locale`; `None` removes them.
    pub fn set_admin_templates(
        &self,
        key: &MessageKey,
        locale: impl Into<Locale>,
        lines: Option<Vec<String>>,
    ) -> Result<(), MessageError> {
        self.set_templates(key, Channel::Admin, locale.into(), lines)
    }

    fn set_templates(
        &self,
        key: &MessageKey,
        channel: Channel,
        locale: Locale,
        lines: Option<Vec<String>>,
    ) -> Result<(), MessageError> {
        let rollback = {
            let mut guard = self.write_lock();
            if lines.is_none() && guard.get(key).is_none() {
                return Ok(());
            }
            debug!(%key, channel = channel.as_str(), %locale, remove = lines.is_none(), "updating templates");
            let previous = self.auto_save.then(|| Arc::clone(&*guard));
            let default_locale = self.entry_locale(key);
            Arc::make_mut(&mut *guard)
                .entry_or_insert(key.clone(), default_locale)
                .set_templates(channel, locale, lines);
            previous.map(|previous| (previous, Arc::clone(&*guard)))
        };

        if let Some((previous, updated)) = rollback {
            if let Err(e) = self.save() {
                // A later writer's catalog already contains this change.
                let mut guard = self.write_lock();
                if Arc::ptr_eq(&*guard, &updated) {
                    *guard = previous;
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn entry_locale(&self, key: &MessageKey) -> Locale {
        self.defaults
            .get(key)
            .map_or_else(|| self.default_locale.clone(), |d| d.default_locale.clone())
    }

    fn write_catalog(&self, catalog: &MessageCatalog) -> Result<(), StorageError> {
        let yaml = catalog.to_yaml()?;
        self.storage.write(&yaml)
    }

    fn storage_failed(&self, operation: &str, error: StorageError) -> MessageError {
        warn!(
            location = %self.storage.describe(),
            operation,
            error = %error,
            "message storage failed"
        );
        MessageError::Storage(error)
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, Arc<MessageCatalog>> {
        // Writers only ever swap in complete catalogs.
        self.catalog.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Arc<MessageCatalog>> {
        self.catalog.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("storage", &self.storage.describe())
            .field("declarations", &self.defaults.len())
            .field("default_locale", &self.default_locale)
            .field("auto_save", &self.auto_save)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, YamlFileStorage};
    use minigames_test_utils::{assert_err, assert_ok, temp_dir, temp_file_named, SAMPLE_MESSAGES_YAML};

    fn defaults() -> MessageDefaults {
        let mut defaults = MessageDefaults::new();
        defaults
            .namespace("core", "en")
            .multi("greeting", &["Hello, %s!"])
            .multi_with_admin("status", &["All good."], &["Tick %d ms"]);
        defaults
    }

    fn lines(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    fn greeting() -> MessageKey {
        MessageKey::new("core", "greeting")
    }

    #[test]
    fn test_first_load_materializes_defaults() {
        let store = MessageStore::new(MemoryStorage::new(), defaults());
        let report = assert_ok!(store.load());
        assert_eq!(
            report,
            LoadReport {
                entries: 2,
                defaults_added: 3,
                persisted: true
            }
        );

        let entry = store.entry(&greeting()).unwrap();
        assert_eq!(entry.user_lines(&Locale::new("en")), ["Hello, %s!"]);
    }

    #[test]
    fn test_second_load_adds_nothing() {
        let dir = temp_dir();
        let path = dir.path().join("messages.yml");

        let first = MessageStore::new(YamlFileStorage::new(&path), defaults());
        assert_ok!(first.load());
        let written = std::fs::read_to_string(&path).unwrap();

        let report = assert_ok!(first.load());
        assert_eq!(report.defaults_added, 0);
        assert!(!report.persisted);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn test_load_keeps_operator_edits() {
        let storage = MemoryStorage::with_contents(
            "core:\n  greeting:\n    default_locale: en\n    user:\n      en: [\"Howdy %s\"]\n",
        );
        let store = MessageStore::new(storage, defaults());
        let report = assert_ok!(store.load());
        assert_eq!(report.defaults_added, 2);

        let entry = store.entry(&greeting()).unwrap();
        assert_eq!(entry.user_lines(&Locale::new("en")), ["Howdy %s"]);
    }

    #[test]
    fn test_set_and_remove_templates() {
        let store = MessageStore::new(MemoryStorage::new(), defaults());
        assert_ok!(store.load());

        assert_ok!(store.set_user_templates(&greeting(), "de", lines(&["Hallo, %s!"])));
        let entry = store.entry(&greeting()).unwrap();
        assert_eq!(entry.user_lines(&Locale::new("de")), ["Hallo, %s!"]);

        assert_ok!(store.set_user_templates(&greeting(), "de", None));
        let entry = store.entry(&greeting()).unwrap();
        assert!(entry.templates(Channel::User, &Locale::new("de")).is_none());
        assert_eq!(entry.user_lines(&Locale::new("de")), ["Hello, %s!"]);
    }

    #[test]
    fn test_removing_from_unknown_key_creates_nothing() {
        let store = MessageStore::new(MemoryStorage::new(), MessageDefaults::new());
        let key = MessageKey::new("signs", "line1");
        assert_ok!(store.set_admin_templates(&key, "en", None));
        assert!(store.entry(&key).is_none());
    }

    #[test]
    fn test_undeclared_entry_uses_store_default_locale() {
        let store = MessageStore::new(MemoryStorage::new(), MessageDefaults::new()).with_default_locale("de");
        let key = MessageKey::new("signs", "line1");
        assert_ok!(store.set_user_templates(&key, "fr", lines(&["Bonjour"])));
        assert_eq!(store.entry(&key).unwrap().default_locale(), &Locale::new("de"));
        assert_eq!(store.orphaned_keys(), vec![key]);
    }

    #[test]
    fn test_save_then_load_into_fresh_store() {
        let dir = temp_dir();
        let path = dir.path().join("messages.yml");

        let store = MessageStore::new(YamlFileStorage::new(&path), defaults());
        assert_ok!(store.load());
        assert_ok!(store.set_admin_templates(&greeting(), "fr", lines(&["Salut %s", "(admin)"])));
        assert_ok!(store.set_user_templates(&MessageKey::new("extra", "note"), "en", Some(Vec::new())));
        assert_ok!(store.save());

        let fresh = MessageStore::new(YamlFileStorage::new(&path), defaults());
        let report = assert_ok!(fresh.load());
        assert_eq!(report.defaults_added, 0);
        assert_eq!(*fresh.snapshot(), *store.snapshot());
    }

    #[test]
    fn test_auto_save_writes_each_change() {
        let dir = temp_dir();
        let path = dir.path().join("messages.yml");
        let store = MessageStore::new(YamlFileStorage::new(&path), MessageDefaults::new()).with_auto_save(true);

        assert_ok!(store.set_user_templates(&greeting(), "en", lines(&["Hi"])));
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("Hi"));
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let dir = temp_dir();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = MessageStore::new(YamlFileStorage::new(blocker.join("messages.yml")), defaults());

        let report = assert_ok!(store.load());
        assert!(!report.persisted);
        assert_eq!(report.defaults_added, 3);

        let err = assert_err!(store.save());
        assert!(matches!(err, MessageError::Storage(StorageError::Write { .. })));
        assert!(store.entry(&greeting()).is_some());
    }

    #[test]
    fn test_auto_save_failure_restores_previous_catalog() {
        let dir = temp_dir();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = MessageStore::new(YamlFileStorage::new(blocker.join("messages.yml")), defaults())
            .with_auto_save(true);
        assert_ok!(store.load());
        let before = store.snapshot();

        let err = assert_err!(store.set_user_templates(&greeting(), "de", lines(&["Hallo"])));
        assert!(matches!(err, MessageError::Storage(StorageError::Write { .. })));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert!(store
            .entry(&greeting())
            .unwrap()
            .templates(Channel::User, &Locale::new("de"))
            .is_none());

        let err = assert_err!(store.set_user_templates(&greeting(), "en", None));
        assert!(matches!(err, MessageError::Storage(_)));
        assert_eq!(store.entry(&greeting()).unwrap().user_lines(&Locale::new("en")), ["Hello, %s!"]);
    }

    #[test]
    fn test_load_nested_namespace_keeps_operator_text() {
        let dir = temp_dir();
        let path = dir.path().join("messages.yml");
        std::fs::write(
            &path,
            "games:\n  ctf:\n    FlagTaken:\n      user:\n        en: [\"Operator edit\"]\n",
        )
        .unwrap();
        let mut declared = MessageDefaults::new();
        declared
            .namespace("games.ctf", "en")
            .multi_with_admin("FlagTaken", &["Default flag text"], &["Flag %s taken"]);
        let key = MessageKey::new("games.ctf", "FlagTaken");

        let store = MessageStore::new(YamlFileStorage::new(&path), declared);
        let report = assert_ok!(store.load());
        assert_eq!(report.defaults_added, 1);
        assert!(report.persisted);
        assert!(store.orphaned_keys().is_empty());
        assert_eq!(store.entry(&key).unwrap().user_lines(&Locale::new("en")), ["Operator edit"]);

        let written: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let entry = &written["games"]["ctf"]["FlagTaken"];
        assert_eq!(entry["user"]["en"][0], "Operator edit");
        assert_eq!(entry["admin"]["en"][0], "Flag %s taken");
        assert!(written.get("games.ctf").is_none());
    }

    #[test]
    fn test_unknown_entry_field_fails_load_without_rewrite() {
        let contents = "core:\n  greeting:\n    default_locale: en\n    usr:\n      en: [\"Howdy\"]\n";
        let (_dir, path) = temp_file_named("messages.yml", contents);
        let store = MessageStore::new(YamlFileStorage::new(&path), defaults());

        let err = assert_err!(store.load());
        assert!(matches!(err, MessageError::Storage(StorageError::Parse { .. })));
        assert!(store.snapshot().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn test_parse_failure_keeps_previous_catalog() {
        let dir = temp_dir();
        let path = dir.path().join("messages.yml");
        let store = MessageStore::new(YamlFileStorage::new(&path), defaults());
        assert_ok!(store.load());
        let before = store.snapshot();

        std::fs::write(&path, "core: [broken\n").unwrap();
        let err = assert_err!(store.load());
        assert!(matches!(err, MessageError::Storage(StorageError::Parse { .. })));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_writes() {
        let store = MessageStore::new(MemoryStorage::new(), defaults());
        assert_ok!(store.load());
        let before = store.snapshot();

        assert_ok!(store.set_user_templates(&greeting(), "en", lines(&["Changed"])));
        assert_eq!(before.get(&greeting()).unwrap().user_lines(&Locale::new("en")), ["Hello, %s!"]);
        assert_eq!(store.entry(&greeting()).unwrap().user_lines(&Locale::new("en")), ["Changed"]);
    }

    #[test]
    fn test_load_operator_file() {
        let (_dir, path) = temp_file_named("messages.yml", SAMPLE_MESSAGES_YAML);
        let mut declared = MessageDefaults::new();
        declared.namespace("arena", "en").multi("Welcome", &["Welcome to %s!"]);

        let store = MessageStore::new(YamlFileStorage::new(&path), declared).with_default_locale("fr");
        let report = assert_ok!(store.load());
        assert_eq!(report.entries, 3);
        assert_eq!(report.defaults_added, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE_MESSAGES_YAML);

        assert_eq!(
            store.orphaned_keys(),
            vec![MessageKey::new("arena", "Full"), MessageKey::new("signs", "Line1")]
        );
        let full = store.entry(&MessageKey::new("arena", "Full")).unwrap();
        assert_eq!(full.user_lines(&Locale::new("de")), ["The arena is full."]);
        let sign = store.entry(&MessageKey::new("signs", "Line1")).unwrap();
        assert_eq!(sign.default_locale(), &Locale::new("fr"));
        assert_eq!(sign.user_lines(&Locale::new("de")), ["Rejoindre"]);
    }

    #[test]
    fn test_concurrent_writers_do_not_lose_updates() {
        let store = Arc::new(MessageStore::new(MemoryStorage::new(), MessageDefaults::new()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let key = MessageKey::new("thread", format!("k{i}"));
                    store.set_user_templates(&key, "en", Some(vec![i.to_string()])).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.snapshot().len(), 8);
    }
}
