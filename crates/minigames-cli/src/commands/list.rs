//! List command implementation.

use clap::Parser;
use minigames_common_i18n::{Channel, MessageEntry, MessageKey, MessageStore};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// List message keys
#[derive(Debug, Parser)]
pub struct ListCommand {
    /// Only keys that no module declares any more
    #[arg(long)]
    pub orphans: bool,

    /// Only keys in this namespace
    #[arg(short, long)]
    pub namespace: Option<String>,
}

/// One catalog entry.
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub key: String,
    pub shape: String,
    pub declared: bool,
    pub default_locale: String,
    pub user_locales: Vec<String>,
    pub admin_locales: Vec<String>,
}

/// Result of `mgmsg list`.
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub messages: Vec<ListEntry>,
}

impl FormattedOutput for ListOutput {
    fn format_text(&self) -> String {
        if self.messages.is_empty() {
            return "No messages".to_string();
        }
        let width = self.messages.iter().map(|m| m.key.len()).max().unwrap_or(0);
        self.messages
            .iter()
            .map(|m| {
                let mut line = format!(
                    "{:width$}  {:11}  user: {}  admin: {}",
                    m.key,
                    m.shape,
                    locale_list(&m.user_locales),
                    locale_list(&m.admin_locales),
                );
                if !m.declared {
                    line.push_str("  (orphaned)");
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn locale_list(locales: &[String]) -> String {
    if locales.is_empty() {
        "-".to_string()
    } else {
        locales.join(",")
    }
}

impl ListEntry {
    fn new(store: &MessageStore, key: &MessageKey, entry: &MessageEntry) -> Self {
        let locales = |channel: Channel| -> Vec<String> { entry.locales(channel).map(|l| l.to_string()).collect() };
        Self {
            key: key.path(),
            shape: store.shape(key).to_string(),
            declared: store.defaults().contains(key),
            default_locale: entry.default_locale().to_string(),
            user_locales: locales(Channel::User),
            admin_locales: locales(Channel::Admin),
        }
    }
}

impl ListCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let (store, _) = ctx.open_store()?;
        let orphaned = store.orphaned_keys();
        let catalog = store.snapshot();

        let messages = catalog
            .iter()
            .filter(|(key, _)| !self.orphans || orphaned.contains(key))
            .filter(|(key, _)| self.namespace.as_deref().map_or(true, |ns| key.namespace() == ns))
            .map(|(key, entry)| ListEntry::new(&store, key, entry))
            .collect();

        print_output(ctx, &ListOutput { messages })
    }
}
