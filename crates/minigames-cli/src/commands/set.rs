//! Set command implementation.

use clap::Parser;
use minigames_common_i18n::{Channel, MessageKey};
use tracing::warn;

use super::{channel, parse_key};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, StatusOutput};

/// Replace the text of a message for one locale
#[derive(Debug, Parser)]
pub struct SetCommand {
    /// Message key, e.g. common.NoPermission
    #[arg(value_parser = parse_key)]
    pub key: MessageKey,

    /// Locale the lines are written in
    #[arg(short, long)]
    pub locale: String,

    /// Set the operator text instead of the player text
    #[arg(long)]
    pub admin: bool,

    /// Template lines, in order
    #[arg(required = true, num_args = 1..)]
    pub lines: Vec<String>,
}

impl SetCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let (store, _) = ctx.open_store()?;
        if !store.defaults().contains(&self.key) {
            warn!(key = %self.key, "message is not declared by any module");
        }

        let lines = Some(self.lines.clone());
        match channel(self.admin) {
            Channel::User => store.set_user_templates(&self.key, self.locale.as_str(), lines)?,
            Channel::Admin => store.set_admin_templates(&self.key, self.locale.as_str(), lines)?,
        }
        ctx.persist(&store)?;

        print_output(
            ctx,
            &StatusOutput::success(format!(
                "{} {} text set for {}",
                self.key,
                channel(self.admin).as_str(),
                self.locale
            )),
        )
    }
}
