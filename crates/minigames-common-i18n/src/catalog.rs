//! The in-memory record set and its persisted document form.

use crate::declare::MessageDefaults;
use crate::entry::{deserialize_templates, Channel, MessageEntry};
use crate::{Locale, MessageKey, StorageError};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, HashSet};

/// All message entries, keyed by message key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    entries: BTreeMap<MessageKey, MessageEntry>,
}

/// Keys of a persisted entry.
const ENTRY_FIELDS: [&str; 3] = ["default_locale", "user", "admin"];

/// Entry as read from disk; `default_locale` may be missing in hand-edited
/// files.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PersistedEntry {
    #[serde(default)]
    default_locale: Option<Locale>,
    #[serde(default, deserialize_with = "deserialize_templates")]
    user: BTreeMap<Locale, Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_templates")]
    admin: BTreeMap<Locale, Vec<String>>,
}

/// A mapping is an entry when it names a scalar `default_locale`, or when
/// every key is an entry field holding locale to template leaves. Anything
/// else is a namespace level.
fn is_entry(node: &Mapping) -> bool {
    match node.get("default_locale") {
        Some(locale) => !locale.is_mapping(),
        None => !node.is_empty() && node.iter().all(|(key, value)| is_field(key) && is_template_map(value)),
    }
}

fn is_field(key: &Value) -> bool {
    key.as_str().map_or(false, |k| ENTRY_FIELDS.contains(&k))
}

fn is_template_map(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Mapping(locales) => locales.values().all(|v| v.is_string() || v.is_sequence()),
        _ => false,
    }
}

fn invalid(path: &[String], message: impl std::fmt::Display) -> StorageError {
    StorageError::Parse {
        line: None,
        message: format!("{}: {message}", path.join(".")),
    }
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for a key.
    pub fn get(&self, key: &MessageKey) -> Option<&MessageEntry> {
        self.entries.get(key)
    }

    /// Entry for a key, created with `default_locale` if missing.
    pub fn entry_or_insert(&mut self, key: MessageKey, default_locale: Locale) -> &mut MessageEntry {
        self.entries
            .entry(key)
            .or_insert_with(|| MessageEntry::new(default_locale))
    }

    /// Insert or replace a whole entry.
    pub fn insert(&mut self, key: MessageKey, entry: MessageEntry) -> Option<MessageEntry> {
        self.entries.insert(key, entry)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MessageKey, &MessageEntry)> {
        self.entries.iter()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &MessageKey> {
        self.entries.keys()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seed shipped defaults without touching existing values.
    ///
    /// For each declaration, the default-locale user lines are added when the
    /// entry has none for that locale, and the admin lines likewise when some
    /// are declared. Returns the number of template sequences added.
    pub fn merge_defaults(&mut self, defaults: &MessageDefaults) -> usize {
        let mut added = 0;
        for declaration in defaults.iter() {
            let locale = &declaration.default_locale;
            let entry = self.entry_or_insert(declaration.key.clone(), locale.clone());

            if entry.templates(Channel::User, locale).is_none() {
                entry.set_user(locale.clone(), Some(declaration.user.clone()));
                added += 1;
            }
            if !declaration.admin.is_empty() && entry.templates(Channel::Admin, locale).is_none() {
                entry.set_admin(locale.clone(), Some(declaration.admin.clone()));
                added += 1;
            }
        }
        added
    }

    /// Parse a persisted document.
    ///
    /// Dotted namespaces are nested one level per segment, so
    /// `games.ctf.FlagTaken` lives at `games: ctf: FlagTaken:`. A top-level
    /// key containing dots is read the same way. `fallback_locale` supplies
    /// the default locale of entries that do not name one.
    pub fn from_yaml<F>(text: &str, fallback_locale: F) -> Result<Self, StorageError>
    where
        F: Fn(&MessageKey) -> Locale,
    {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let document: Value = serde_yaml::from_str(text).map_err(|e| StorageError::Parse {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

        let mut catalog = Self::new();
        match document {
            Value::Null => {}
            Value::Mapping(root) => catalog.read_level(&mut Vec::new(), root, &fallback_locale)?,
            _ => return Err(invalid(&[], "expected a mapping of namespaces")),
        }
        Ok(catalog)
    }

    fn read_level<F>(
        &mut self,
        path: &mut Vec<String>,
        level: Mapping,
        fallback_locale: &F,
    ) -> Result<(), StorageError>
    where
        F: Fn(&MessageKey) -> Locale,
    {
        for (name, node) in level {
            let name = match name {
                Value::String(name) => name,
                other => return Err(invalid(path, format!("key {other:?} is not a string"))),
            };
            path.push(name);
            match node {
                Value::Mapping(node) if is_entry(&node) => {
                    self.read_entry(path, node, fallback_locale)?
                }
                Value::Mapping(node) => self.read_level(path, node, fallback_locale)?,
                Value::Null => {}
                _ => return Err(invalid(path, "expected a namespace or a message entry")),
            }
            path.pop();
        }
        Ok(())
    }

    fn read_entry<F>(
        &mut self,
        path: &[String],
        node: Mapping,
        fallback_locale: &F,
    ) -> Result<(), StorageError>
    where
        F: Fn(&MessageKey) -> Locale,
    {
        let Some((name, namespace)) = path.split_last().filter(|(_, ns)| !ns.is_empty()) else {
            return Err(invalid(path, "message entry outside a namespace"));
        };
        let key = MessageKey::new(namespace.join("."), name.clone());
        let persisted: PersistedEntry =
            serde_yaml::from_value(Value::Mapping(node)).map_err(|e| invalid(path, e))?;

        let default_locale = persisted
            .default_locale
            .unwrap_or_else(|| fallback_locale(&key));
        let mut entry = MessageEntry::new(default_locale);
        for (locale, lines) in persisted.user {
            entry.set_user(locale, Some(lines));
        }
        for (locale, lines) in persisted.admin {
            entry.set_admin(locale, Some(lines));
        }
        if self.entries.insert(key.clone(), entry).is_some() {
            return Err(invalid(path, format!("{key} is defined twice")));
        }
        Ok(())
    }

    /// Render the persisted document.
    ///
    /// Fails when a namespace segment has the same path as an entry.
    pub fn to_yaml(&self) -> Result<String, StorageError> {
        let mut root = Mapping::new();
        let mut entry_paths = HashSet::new();
        for (key, entry) in &self.entries {
            let clash = || StorageError::Serialize(format!("{key} clashes with another message path"));

            let mut level = &mut root;
            let mut prefix = String::new();
            for segment in key.namespace().split('.') {
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(segment);
                if entry_paths.contains(&prefix) {
                    return Err(clash());
                }
                let node = level
                    .entry(Value::String(segment.to_string()))
                    .or_insert_with(|| Value::Mapping(Mapping::new()));
                level = match node {
                    Value::Mapping(child) => child,
                    _ => return Err(clash()),
                };
            }
            let value = serde_yaml::to_value(entry).map_err(|e| StorageError::Serialize(e.to_string()))?;
            if level.insert(Value::String(key.name().to_string()), value).is_some() {
                return Err(clash());
            }
            entry_paths.insert(key.path());
        }
        serde_yaml::to_string(&root).map_err(|e| StorageError::Serialize(e.to_string()))
    }
}
