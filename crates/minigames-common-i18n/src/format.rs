//! Placeholder substitution with locale-aware number and date rendering.
//!
//! Templates use printf-style placeholders: `%s`, `%S`, `%d`, `%f`, `%.2f`,
//! `%,d`, `%b`, `%n`, `%%` and explicit positions such as `%2$s`. A
//! placeholder whose argument is missing, or that uses an unsupported
//! conversion, is copied to the output unchanged.

use crate::Locale;
use chrono::{DateTime, Utc};
use std::iter::Peekable;
use std::str::Chars;

/// Default number of fraction digits for `%f`.
const DEFAULT_PRECISION: usize = 6;

/// Largest accepted `%.Nf` precision.
pub const MAX_PRECISION: usize = 64;

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    /// Plain text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Point in time, rendered with the requested locale's date pattern.
    DateTime(DateTime<Utc>),
    /// A game object with a stable id and a human readable name.
    Entity {
        /// Raw identifier, shown to operators.
        id: String,
        /// Display name, shown to players.
        display: String,
    },
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for MessageArg {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for MessageArg {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for MessageArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MessageArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MessageArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for MessageArg {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Converts caller arguments before substitution.
///
/// `admin_mode` is true when the admin channel is being rendered, which lets
/// a host show raw identifiers to operators and display names to players.
pub trait ArgumentFormatter: Send + Sync {
    /// Convert arguments for one resolution.
    fn convert(&self, locale: &Locale, admin_mode: bool, args: &[MessageArg]) -> Vec<MessageArg>;
}

/// Default converter: entities become their id in admin mode and their
/// display name otherwise; all other values pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainArguments;

impl ArgumentFormatter for PlainArguments {
    fn convert(&self, _locale: &Locale, admin_mode: bool, args: &[MessageArg]) -> Vec<MessageArg> {
        args.iter()
            .map(|arg| match arg {
                MessageArg::Entity { id, display } => {
                    MessageArg::Text(if admin_mode { id.clone() } else { display.clone() })
                }
                other => other.clone(),
            })
            .collect()
    }
}

/// Separators used when rendering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberStyle {
    /// Between integer and fraction digits.
    pub decimal: char,
    /// Between groups of three integer digits.
    pub grouping: char,
}

impl NumberStyle {
    /// Conventions for a locale's language.
    pub fn for_locale(locale: &Locale) -> Self {
        match locale.language().as_str() {
            "de" | "es" | "it" | "pt" | "nl" => Self { decimal: ',', grouping: '.' },
            "fr" | "ru" | "pl" => Self { decimal: ',', grouping: ' ' },
            _ => Self { decimal: '.', grouping: ',' },
        }
    }
}

/// chrono pattern for date-time arguments.
fn date_pattern(locale: &Locale) -> &'static str {
    match locale.language().as_str() {
        "de" => "%d.%m.%Y %H:%M",
        "fr" | "es" | "it" => "%d/%m/%Y %H:%M",
        "en" => "%m/%d/%Y %H:%M",
        _ => "%Y-%m-%d %H:%M",
    }
}

/// Substitute `args` into `template` using `locale`'s conventions.
pub fn format_template(locale: &Locale, template: &str, args: &[MessageArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = match parse_placeholder(&mut chars) {
            Ok(spec) => spec,
            Err(raw) => {
                out.push_str(&raw);
                continue;
            }
        };

        match spec.conversion {
            '%' => out.push('%'),
            'n' => out.push('\n'),
            's' | 'S' | 'd' | 'f' | 'b' => {
                let index = spec.index.unwrap_or_else(|| {
                    let i = next_arg;
                    next_arg += 1;
                    i
                });
                match args.get(index) {
                    Some(arg) => out.push_str(&render(locale, &spec, arg)),
                    None => out.push_str(&spec.raw),
                }
            }
            _ => out.push_str(&spec.raw),
        }
    }

    out
}

struct Placeholder {
    raw: String,
    index: Option<usize>,
    grouped: bool,
    precision: Option<usize>,
    conversion: char,
}

/// Parse what follows a `%`. On failure returns the text consumed so far.
fn parse_placeholder(chars: &mut Peekable<Chars<'_>>) -> Result<Placeholder, String> {
    let mut raw = String::from('%');

    let digits = take_digits(chars, &mut raw);
    let mut index = None;
    if !digits.is_empty() {
        if chars.peek() != Some(&'$') {
            // Widths are not supported.
            return Err(raw);
        }
        chars.next();
        raw.push('$');
        match digits.parse::<usize>() {
            Ok(position) if position > 0 => index = Some(position - 1),
            _ => return Err(raw),
        }
    }

    let grouped = chars.peek() == Some(&',');
    if grouped {
        chars.next();
        raw.push(',');
    }

    let mut precision = None;
    if chars.peek() == Some(&'.') {
        chars.next();
        raw.push('.');
        match take_digits(chars, &mut raw).parse::<usize>() {
            Ok(p) if p <= MAX_PRECISION => precision = Some(p),
            _ => return Err(raw),
        }
    }

    let Some(conversion) = chars.next() else {
        return Err(raw);
    };
    raw.push(conversion);

    Ok(Placeholder {
        raw,
        index,
        grouped,
        precision,
        conversion,
    })
}

fn take_digits(chars: &mut Peekable<Chars<'_>>, raw: &mut String) -> String {
    let mut digits = String::new();
    while let Some(&d) = chars.peek() {
        if !d.is_ascii_digit() {
            break;
        }
        digits.push(d);
        raw.push(d);
        chars.next();
    }
    digits
}

fn render(locale: &Locale, spec: &Placeholder, arg: &MessageArg) -> String {
    let style = NumberStyle::for_locale(locale);
    match (spec.conversion, arg) {
        ('d', MessageArg::Integer(n)) => format_integer(*n, style, spec.grouped),
        ('f', MessageArg::Float(v)) => format_float(
            *v,
            spec.precision.unwrap_or(DEFAULT_PRECISION),
            style,
            spec.grouped,
        ),
        ('f', MessageArg::Integer(n)) => format_float(
            *n as f64,
            spec.precision.unwrap_or(DEFAULT_PRECISION),
            style,
            spec.grouped,
        ),
        ('b', MessageArg::Bool(b)) => b.to_string(),
        ('b', _) => "true".to_string(),
        ('S', arg) => render_string(locale, arg).to_uppercase(),
        (_, arg) => render_string(locale, arg),
    }
}

fn render_string(locale: &Locale, arg: &MessageArg) -> String {
    match arg {
        MessageArg::Text(s) => s.clone(),
        MessageArg::Integer(n) => n.to_string(),
        MessageArg::Float(v) => v.to_string(),
        MessageArg::Bool(b) => b.to_string(),
        MessageArg::DateTime(t) => t.format(date_pattern(locale)).to_string(),
        MessageArg::Entity { display, .. } => display.clone(),
    }
}

/// Render an integer, optionally with grouping separators.
pub fn format_integer(value: i64, style: NumberStyle, grouped: bool) -> String {
    let digits = value.unsigned_abs().to_string();
    let body = if grouped {
        group_digits(&digits, style.grouping)
    } else {
        digits
    };
    if value < 0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Render a float with a fixed number of fraction digits, at most
/// [`MAX_PRECISION`].
pub fn format_float(value: f64, precision: usize, style: NumberStyle, grouped: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", precision.min(MAX_PRECISION), value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + 4);
    if value.is_sign_negative() && value != 0.0 {
        out.push('-');
    }
    if grouped {
        out.push_str(&group_digits(int_part, style.grouping));
    } else {
        out.push_str(int_part);
    }
    if let Some(frac) = frac_part {
        out.push(style.decimal);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, d) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(d);
    }
    out
}
