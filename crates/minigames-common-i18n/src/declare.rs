//! Built-in message declarations.
//!
//! Each feature module registers the messages it ships with, together with
//! their default text. The store seeds missing entries from this table on
//! load, so a fresh install gets an editable file of every default.

use crate::{Locale, MessageKey};
use std::collections::HashMap;
use tracing::warn;

/// Whether a message is rendered as one string or as several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageShape {
    /// One line, read with the `*_message` accessors.
    Single,
    /// Any number of lines, read with the `resolve_*` accessors.
    Multi,
}

impl std::fmt::Display for MessageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => f.write_str("single-line"),
            Self::Multi => f.write_str("multi-line"),
        }
    }
}

/// One shipped message and its default text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDeclaration {
    /// Message identifier.
    pub key: MessageKey,
    /// Locale the defaults are written in.
    pub default_locale: Locale,
    /// Accessor shape.
    pub shape: MessageShape,
    /// Default user-channel lines.
    pub user: Vec<String>,
    /// Default admin-channel lines; empty when none is shipped.
    pub admin: Vec<String>,
}

/// Registration table of every shipped message.
#[derive(Debug, Clone, Default)]
pub struct MessageDefaults {
    declarations: Vec<MessageDeclaration>,
    index: HashMap<MessageKey, usize>,
}

impl MessageDefaults {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start registering messages of one namespace.
    pub fn namespace(
        &mut self,
        namespace: impl Into<String>,
        default_locale: impl Into<Locale>,
    ) -> NamespaceBuilder<'_> {
        NamespaceBuilder {
            defaults: self,
            namespace: namespace.into(),
            default_locale: default_locale.into(),
        }
    }

    /// Register a declaration. A key that is already registered keeps its
    /// first declaration; returns false in that case.
    pub fn register(&mut self, declaration: MessageDeclaration) -> bool {
        if self.index.contains_key(&declaration.key) {
            warn!(key = %declaration.key, "duplicate message declaration ignored");
            return false;
        }
        self.index
            .insert(declaration.key.clone(), self.declarations.len());
        self.declarations.push(declaration);
        true
    }

    /// Merge another table into this one.
    pub fn extend(&mut self, other: MessageDefaults) {
        for declaration in other.declarations {
            self.register(declaration);
        }
    }

    /// Declaration for a key.
    pub fn get(&self, key: &MessageKey) -> Option<&MessageDeclaration> {
        self.index.get(key).map(|&i| &self.declarations[i])
    }

    /// True if the key is declared.
    pub fn contains(&self, key: &MessageKey) -> bool {
        self.index.contains_key(key)
    }

    /// Shape of a key; undeclared keys are multi-line.
    pub fn shape(&self, key: &MessageKey) -> MessageShape {
        self.get(key).map_or(MessageShape::Multi, |d| d.shape)
    }

    /// Declarations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MessageDeclaration> {
        self.declarations.iter()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// True if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Registers messages that share a namespace and default locale.
pub struct NamespaceBuilder<'a> {
    defaults: &'a mut MessageDefaults,
    namespace: String,
    default_locale: Locale,
}

impl NamespaceBuilder<'_> {
    /// A single-line message.
    pub fn single(self, name: &str, text: &str) -> Self {
        self.push(name, MessageShape::Single, &[text], &[])
    }

    /// A single-line message with a separate operator text.
    pub fn single_with_admin(self, name: &str, text: &str, admin: &str) -> Self {
        self.push(name, MessageShape::Single, &[text], &[admin])
    }

    /// A multi-line message.
    pub fn multi(self, name: &str, lines: &[&str]) -> Self {
        self.push(name, MessageShape::Multi, lines, &[])
    }

    /// A multi-line message with separate operator lines.
    pub fn multi_with_admin(self, name: &str, lines: &[&str], admin: &[&str]) -> Self {
        self.push(name, MessageShape::Multi, lines, admin)
    }

    fn push(self, name: &str, shape: MessageShape, user: &[&str], admin: &[&str]) -> Self {
        self.defaults.register(MessageDeclaration {
            key: MessageKey::new(self.namespace.clone(), name),
            default_locale: self.default_locale.clone(),
            shape,
            user: user.iter().map(|s| s.to_string()).collect(),
            admin: admin.iter().map(|s| s.to_string()).collect(),
        });
        self
    }
}
