//! Init command implementation.

use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Load the messages file, adding every missing default
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// Also write minigames.yaml with the current settings if it is missing
    #[arg(long)]
    pub write_config: bool,
}

/// Result of `mgmsg init`.
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub messages_file: String,
    pub entries: usize,
    pub defaults_added: usize,
    pub persisted: bool,
    pub config_written: bool,
}

impl FormattedOutput for InitOutput {
    fn format_text(&self) -> String {
        let mut lines = vec![format!("✓ {} messages in {}", self.entries, self.messages_file)];
        if self.defaults_added > 0 {
            let state = if self.persisted { "saved" } else { "not saved" };
            lines.push(format!("  {} defaults added ({state})", self.defaults_added));
        }
        if self.config_written {
            lines.push("  wrote minigames.yaml".to_string());
        }
        lines.join("\n")
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl InitCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let config_written = self.write_config && !ctx.loader.config_path().exists();
        if config_written {
            ctx.loader.save(&ctx.config)?;
            info!(path = %ctx.loader.config_path().display(), "wrote configuration");
        }

        let (_, report) = ctx.open_store()?;
        if report.defaults_added > 0 && !report.persisted {
            return Err(CliError::user_with_hint(
                format!("could not write {}", ctx.messages_path().display()),
                "check that the data directory is writable",
            ));
        }

        print_output(
            ctx,
            &InitOutput {
                messages_file: ctx.messages_path().display().to_string(),
                entries: report.entries,
                defaults_added: report.defaults_added,
                persisted: report.persisted,
                config_written,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let out = InitOutput {
            messages_file: "/srv/mg/messages.yml".to_string(),
            entries: 4,
            defaults_added: 4,
            persisted: true,
            config_written: false,
        };
        assert_eq!(
            out.format_text(),
            "✓ 4 messages in /srv/mg/messages.yml\n  4 defaults added (saved)"
        );
    }
}
