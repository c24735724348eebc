//! Per-key message entries with user and admin channels.

use crate::format::{format_template, ArgumentFormatter, MessageArg};
use crate::Locale;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Which of the two message variants is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Player-facing text.
    User,
    /// Operator-facing text.
    Admin,
}

impl Channel {
    /// Key used for this channel in persisted documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Templates of one message for every locale and both channels.
///
/// An entry can also be embedded directly in any serde document (arena
/// descriptions, sign texts) and resolved on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageEntry {
    #[serde(default)]
    default_locale: Locale,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_templates"
    )]
    user: BTreeMap<Locale, Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_templates"
    )]
    admin: BTreeMap<Locale, Vec<String>>,
}

impl MessageEntry {
    /// Create an entry with no templates.
    pub fn new(default_locale: impl Into<Locale>) -> Self {
        Self {
            default_locale: default_locale.into(),
            user: BTreeMap::new(),
            admin: BTreeMap::new(),
        }
    }

    /// Locale used when the requested one has no templates.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Stored templates for one channel and locale, empty sequences included.
    pub fn templates(&self, channel: Channel, locale: &Locale) -> Option<&[String]> {
        self.channel(channel).get(locale).map(Vec::as_slice)
    }

    /// Replace the templates for one channel and locale; `None` removes them.
    pub fn set_templates(&mut self, channel: Channel, locale: Locale, lines: Option<Vec<String>>) {
        let map = match channel {
            Channel::User => &mut self.user,
            Channel::Admin => &mut self.admin,
        };
        match lines {
            Some(lines) => {
                map.insert(locale, lines);
            }
            None => {
                map.remove(&locale);
            }
        }
    }

    /// Replace the user templates for a locale.
    pub fn set_user(&mut self, locale: impl Into<Locale>, lines: Option<Vec<String>>) {
        self.set_templates(Channel::User, locale.into(), lines);
    }

    /// Replace the admin templates for a locale.
    pub fn set_admin(&mut self, locale: impl Into<Locale>, lines: Option<Vec<String>>) {
        self.set_templates(Channel::Admin, locale.into(), lines);
    }

    /// Locales with stored templates on a channel.
    pub fn locales(&self, channel: Channel) -> impl Iterator<Item = &Locale> {
        self.channel(channel).keys()
    }

    /// True when neither channel holds any templates.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.admin.is_empty()
    }

    /// User templates after fallback: requested locale, then default locale.
    pub fn user_lines(&self, locale: &Locale) -> &[String] {
        self.first_non_empty(&[
            (Channel::User, locale),
            (Channel::User, &self.default_locale),
        ])
    }

    /// Admin templates after fallback.
    ///
    /// Order: admin at the requested locale, user at the requested locale,
    /// admin at the default locale, user at the default locale.
    pub fn admin_lines(&self, locale: &Locale) -> &[String] {
        self.first_non_empty(&[
            (Channel::Admin, locale),
            (Channel::User, locale),
            (Channel::Admin, &self.default_locale),
            (Channel::User, &self.default_locale),
        ])
    }

    /// Resolve and format the user variant.
    pub fn format_user(
        &self,
        locale: &Locale,
        args: &[MessageArg],
        formatter: &dyn ArgumentFormatter,
    ) -> Vec<String> {
        let templates = self.user_lines(locale);
        if templates.is_empty() {
            return Vec::new();
        }
        let args = formatter.convert(locale, false, args);
        templates
            .iter()
            .map(|t| format_template(locale, t, &args))
            .collect()
    }

    /// Resolve and format the admin variant.
    pub fn format_admin(
        &self,
        locale: &Locale,
        args: &[MessageArg],
        formatter: &dyn ArgumentFormatter,
    ) -> Vec<String> {
        let templates = self.admin_lines(locale);
        if templates.is_empty() {
            return Vec::new();
        }
        let args = formatter.convert(locale, true, args);
        templates
            .iter()
            .map(|t| format_template(locale, t, &args))
            .collect()
    }

    fn channel(&self, channel: Channel) -> &BTreeMap<Locale, Vec<String>> {
        match channel {
            Channel::User => &self.user,
            Channel::Admin => &self.admin,
        }
    }

    fn first_non_empty(&self, chain: &[(Channel, &Locale)]) -> &[String] {
        chain
            .iter()
            .filter_map(|(channel, locale)| self.templates(*channel, locale))
            .find(|lines| !lines.is_empty())
            .unwrap_or(&[])
    }
}

impl Default for MessageEntry {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

/// Leaf values are lists of strings, but a bare string is read as one line.
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateValue {
    One(String),
    Many(Vec<String>),
}

impl From<TemplateValue> for Vec<String> {
    fn from(value: TemplateValue) -> Self {
        match value {
            TemplateValue::One(line) => vec![line],
            TemplateValue::Many(lines) => lines,
        }
    }
}

pub(crate) fn deserialize_templates<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Locale, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<Locale, TemplateValue>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(locale, value)| (locale, value.into()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PlainArguments;

    fn lines(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_user_fallback_to_default_locale() {
        let mut entry = MessageEntry::new("en");
        entry.set_user("en", lines(&["Hello, %s!"]));

        let out = entry.format_user(&Locale::new("de"), &["World".into()], &PlainArguments);
        assert_eq!(out, vec!["Hello, World!"]);
    }

    #[test]
    fn test_user_lines_empty_when_nothing_matches() {
        let mut entry = MessageEntry::new("en");
        entry.set_admin("en", lines(&["Raw id: %s"]));
        assert!(entry.user_lines(&Locale::new("en")).is_empty());
        assert!(entry.user_lines(&Locale::new("fr")).is_empty());
    }

    #[test]
    fn test_empty_sequence_counts_as_absent() {
        let mut entry = MessageEntry::new("en");
        entry.set_user("en", lines(&["fallback"]));
        entry.set_user("de", Some(Vec::new()));
        assert_eq!(entry.user_lines(&Locale::new("de")), ["fallback"]);
    }

    #[test]
    fn test_admin_cascade_order() {
        let de = Locale::new("de");
        let mut entry = MessageEntry::new("en");
        entry.set_user("en", lines(&["user en"]));
        assert_eq!(entry.admin_lines(&de), ["user en"]);

        entry.set_admin("en", lines(&["admin en"]));
        assert_eq!(entry.admin_lines(&de), ["admin en"]);

        entry.set_user("de", lines(&["user de"]));
        assert_eq!(entry.admin_lines(&de), ["user de"]);

        entry.set_admin("de", Some(Vec::new()));
        assert_eq!(entry.admin_lines(&de), ["user de"]);

        entry.set_admin("de", lines(&["admin de"]));
        assert_eq!(entry.admin_lines(&de), ["admin de"]);
    }

    #[test]
    fn test_remove_locale() {
        let mut entry = MessageEntry::new("en");
        entry.set_user("en", lines(&["en"]));
        entry.set_user("fr", lines(&["fr"]));
        assert_eq!(entry.user_lines(&Locale::new("fr")), ["fr"]);

        entry.set_user("fr", None);
        assert!(entry.templates(Channel::User, &Locale::new("fr")).is_none());
        assert_eq!(entry.user_lines(&Locale::new("fr")), ["en"]);
    }

    #[test]
    fn test_admin_mode_reaches_formatter() {
        let mut entry = MessageEntry::new("en");
        entry.set_user("en", lines(&["Player %s"]));
        let arg = MessageArg::Entity {
            id: "4f1c".to_string(),
            display: "Steve".to_string(),
        };
        let en = Locale::new("en");
        assert_eq!(entry.format_user(&en, &[arg.clone()], &PlainArguments), ["Player Steve"]);
        assert_eq!(entry.format_admin(&en, &[arg], &PlainArguments), ["Player 4f1c"]);
    }

    #[test]
    fn test_embedded_entry_reads_scalar_and_list_values() {
        let yaml = r#"
default_locale: de
user:
  de: "Willkommen"
  en:
    - "Welcome"
    - "to the arena"
"#;
        let entry: MessageEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.default_locale(), &Locale::new("de"));
        assert_eq!(entry.user_lines(&Locale::new("de")), ["Willkommen"]);
        assert_eq!(entry.user_lines(&Locale::new("en")), ["Welcome", "to the arena"]);
        assert!(entry.locales(Channel::Admin).next().is_none());
    }

    #[test]
    fn test_embedded_entry_rejects_unknown_fields() {
        let result: Result<MessageEntry, _> = serde_yaml::from_str("usr:\n  en: Hi\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_embedded_entry_defaults_to_english() {
        let entry: MessageEntry = serde_yaml::from_str("user: {}").unwrap();
        assert_eq!(entry.default_locale(), &Locale::new("en"));
        assert!(entry.is_empty());
    }
}
