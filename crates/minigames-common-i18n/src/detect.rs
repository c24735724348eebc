//! Locale detection for console senders.

use super::Locale;
use std::env;

/// Variables consulted by [`detect_locale`], highest priority first.
pub const LOCALE_VARS: [&str; 4] = ["MINIGAMES_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Detect the locale of the console from the environment.
pub fn detect_locale() -> Option<Locale> {
    detect_locale_from(|var| env::var(var).ok())
}

/// Walk [`LOCALE_VARS`] through `lookup` and return the first usable tag.
pub fn detect_locale_from<F>(lookup: F) -> Option<Locale>
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_VARS
        .iter()
        .find_map(|var| lookup(*var).and_then(|value| parse_env_locale(&value)))
}

/// Turn a POSIX locale value (`de_DE.UTF-8@euro`) into a tag (`de_DE`).
///
/// The tag is kept as written otherwise; `C` and `POSIX` mean "unset".
pub fn parse_env_locale(value: &str) -> Option<Locale> {
    let tag = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    match tag {
        "" | "C" | "POSIX" => None,
        tag => Some(Locale::new(tag)),
    }
}
