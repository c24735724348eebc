//! Show command implementation.

use clap::Parser;
use minigames_common_i18n::{
    detect_locale, Locale, MessageArg, MessageKey, MessageResolver, MessageShape,
};
use serde::Serialize;

use super::{channel, parse_key, similar_keys};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Resolve a message for a locale
#[derive(Debug, Parser)]
pub struct ShowCommand {
    /// Message key, e.g. common.NoPermission
    #[arg(value_parser = parse_key)]
    pub key: MessageKey,

    /// Locale to resolve for; defaults to the console locale
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Resolve the operator text
    #[arg(long)]
    pub admin: bool,

    /// Placeholder arguments, in order
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Resolved message lines.
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub key: String,
    pub locale: String,
    pub channel: &'static str,
    pub lines: Vec<String>,
}

impl FormattedOutput for ShowOutput {
    fn format_text(&self) -> String {
        self.lines.join("\n")
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Interpret a command line argument as the most specific value it spells.
pub fn parse_arg(value: &str) -> MessageArg {
    if let Ok(n) = value.parse::<i64>() {
        return MessageArg::Integer(n);
    }
    if value.contains('.') {
        if let Ok(f) = value.parse::<f64>() {
            if f.is_finite() {
                return MessageArg::Float(f);
            }
        }
    }
    match value {
        "true" => MessageArg::Bool(true),
        "false" => MessageArg::Bool(false),
        _ => MessageArg::Text(value.to_string()),
    }
}

impl ShowCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let (store, _) = ctx.open_store()?;
        if store.entry(&self.key).is_none() {
            return Err(CliError::not_found_with_suggestions(
                "message",
                self.key.path(),
                similar_keys(&store, &self.key),
            ));
        }

        let locale = match &self.locale {
            Some(tag) => Locale::new(tag.as_str()),
            None => detect_locale()
                .unwrap_or_else(|| Locale::new(ctx.config.messages.default_locale.as_str())),
        };
        let args: Vec<MessageArg> = self.args.iter().map(String::as_str).map(parse_arg).collect();

        let resolver = MessageResolver::new(store);
        let lines = match (resolver.store().shape(&self.key), self.admin) {
            (MessageShape::Multi, false) => resolver.resolve_user(&self.key, &locale, &args)?,
            (MessageShape::Multi, true) => resolver.resolve_admin(&self.key, &locale, &args)?,
            (MessageShape::Single, false) => non_empty(resolver.user_message(&self.key, &locale, &args)?),
            (MessageShape::Single, true) => non_empty(resolver.admin_message(&self.key, &locale, &args)?),
        };

        print_output(
            ctx,
            &ShowOutput {
                key: self.key.path(),
                locale: locale.to_string(),
                channel: channel(self.admin).as_str(),
                lines,
            },
        )
    }
}

fn non_empty(text: String) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg() {
        assert_eq!(parse_arg("42"), MessageArg::Integer(42));
        assert_eq!(parse_arg("-7"), MessageArg::Integer(-7));
        assert_eq!(parse_arg("2.5"), MessageArg::Float(2.5));
        assert_eq!(parse_arg("true"), MessageArg::Bool(true));
        assert_eq!(parse_arg("inf"), MessageArg::Text("inf".to_string()));
        assert_eq!(parse_arg("Lava Pit"), MessageArg::Text("Lava Pit".to_string()));
    }
}
