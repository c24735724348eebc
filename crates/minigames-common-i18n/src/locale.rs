//! Locale tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language/region tag such as `en`, `de` or `en_US`.
///
/// Tags are opaque: two locales are equal only when their tags are
/// byte-for-byte equal. Nothing is normalized or validated, so an unknown
/// tag simply never matches a stored template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from any tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The raw tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased language part of the tag (`"de_AT"` -> `"de"`).
    ///
    /// Only used to pick number and date conventions while formatting.
    pub fn language(&self) -> String {
        self.0
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_equality_is_exact() {
        assert_eq!(Locale::new("en"), Locale::from("en"));
        assert_ne!(Locale::new("en"), Locale::new("EN"));
        assert_ne!(Locale::new("en"), Locale::new("en_US"));
    }

    #[test]
    fn test_locale_language() {
        assert_eq!(Locale::new("de_AT").language(), "de");
        assert_eq!(Locale::new("pt-BR").language(), "pt");
        assert_eq!(Locale::new("EN").language(), "en");
        assert_eq!(Locale::new("").language(), "");
    }

    #[test]
    fn test_locale_properties() {
        assert_eq!(Locale::default().as_str(), "en");
        assert_eq!(Locale::new("zh_CN").to_string(), "zh_CN");
    }

    #[test]
    fn test_locale_serializes_as_plain_string() {
        let yaml = serde_yaml::to_string(&Locale::new("de")).unwrap();
        assert_eq!(yaml.trim(), "de");
        let parsed: Locale = serde_yaml::from_str("en_US").unwrap();
        assert_eq!(parsed, Locale::new("en_US"));
    }
}
