//! Message keys.

use std::fmt;

/// Identifier of one localizable message: catalog namespace plus entry name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    namespace: String,
    name: String,
}

impl MessageKey {
    /// Create a key from its two parts.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a dotted path (`"arena.JoinFailed"`), splitting at the last dot.
    pub fn parse(path: &str) -> Option<Self> {
        let (namespace, name) = path.rsplit_once('.')?;
        if namespace.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(namespace, name))
    }

    /// Catalog namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Entry name within the namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<namespace>.<name>`.
    pub fn path(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}
