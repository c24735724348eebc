//! Unset command implementation.

use clap::Parser;
use minigames_common_i18n::{Channel, Locale, MessageKey};

use super::{channel, parse_key};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, StatusOutput};

/// Remove the text of a message for one locale
#[derive(Debug, Parser)]
pub struct UnsetCommand {
    /// Message key, e.g. common.NoPermission
    #[arg(value_parser = parse_key)]
    pub key: MessageKey,

    /// Locale to remove
    #[arg(short, long)]
    pub locale: String,

    /// Remove the operator text instead of the player text
    #[arg(long)]
    pub admin: bool,
}

impl UnsetCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let (store, _) = ctx.open_store()?;
        let channel = channel(self.admin);
        let locale = Locale::new(self.locale.as_str());

        let present = store
            .entry(&self.key)
            .is_some_and(|entry| entry.templates(channel, &locale).is_some());
        if !present {
            return print_output(
                ctx,
                &StatusOutput::unchanged(format!(
                    "{} has no {} text for {}",
                    self.key,
                    channel.as_str(),
                    locale
                )),
            );
        }

        match channel {
            Channel::User => store.set_user_templates(&self.key, locale.clone(), None)?,
            Channel::Admin => store.set_admin_templates(&self.key, locale.clone(), None)?,
        }
        ctx.persist(&store)?;

        print_output(
            ctx,
            &StatusOutput::success(format!("{} {} text removed for {}", self.key, channel.as_str(), locale)),
        )
    }
}
