//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use minigames_common_config::{ConfigLoader, Environment, LogOutput, LogSettings, MinigamesConfig};
use minigames_common_i18n::{LoadReport, MessageStore, YamlFileStorage};
use minigames_common_log::{LogConfig, LogFormat, LogLevel};

use crate::builtin;
use crate::commands::{InitCommand, ListCommand, SetCommand, ShowCommand, UnsetCommand};
use crate::error::CliError;

/// Inspect and edit the localized messages of a Minigames server.
#[derive(Debug, Parser)]
#[command(
    name = "mgmsg",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Data directory holding minigames.yaml and the messages file
    #[arg(
        short,
        long,
        global = true,
        env = "MINIGAMES_DATA_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the messages file, adding every missing default
    Init(InitCommand),

    /// Resolve a message for a locale
    Show(ShowCommand),

    /// Replace the text of a message for one locale
    Set(SetCommand),

    /// Remove the text of a message for one locale
    Unset(UnsetCommand),

    /// List message keys
    List(ListCommand),
}

impl Cli {
    /// Data directory from the flag or environment, else the current directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Environment::data_dir)
    }

    /// Logging configuration: file settings, then environment, then flags.
    pub fn log_config(&self, settings: &LogSettings) -> LogConfig {
        let mut config = LogConfig {
            level: LogLevel::parse(&settings.level).unwrap_or(LogLevel::Warn),
            format: match settings.format {
                LogOutput::Pretty => LogFormat::Pretty,
                LogOutput::Compact => LogFormat::Compact,
                LogOutput::Json => LogFormat::Json,
            },
            file_path: settings.file.clone(),
            ..LogConfig::default()
        }
        .with_env_overrides();

        if let Some(level) = LogLevel::from_verbosity(self.verbose, self.quiet) {
            config.level = level;
        }
        config
    }

    /// Execute the selected command
    pub fn execute(self, loader: ConfigLoader, config: MinigamesConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            loader,
            config,
            format: self.format,
        };

        match self.command {
            Command::Init(cmd) => cmd.execute(&ctx),
            Command::Show(cmd) => cmd.execute(&ctx),
            Command::Set(cmd) => cmd.execute(&ctx),
            Command::Unset(cmd) => cmd.execute(&ctx),
            Command::List(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub loader: ConfigLoader,
    pub config: MinigamesConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Location of the messages document.
    pub fn messages_path(&self) -> PathBuf {
        self.loader.messages_path(&self.config)
    }

    /// Open and load the message store with the built-in declarations.
    pub fn open_store(&self) -> Result<(Arc<MessageStore>, LoadReport), CliError> {
        let store = MessageStore::new(YamlFileStorage::new(self.messages_path()), builtin::defaults())
            .with_default_locale(self.config.messages.default_locale.as_str())
            .with_auto_save(self.config.messages.auto_save);
        let report = store.load()?;
        Ok((Arc::new(store), report))
    }

    /// Write the store unless every change was already saved.
    pub fn persist(&self, store: &MessageStore) -> Result<(), CliError> {
        if !self.config.messages.auto_save {
            store.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from([
            "mgmsg", "--format", "json", "show", "common.InfoMinigamesLine", "--locale", "de", "--admin", "Spleef",
            "Last one standing",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Show(cmd) => {
                assert_eq!(cmd.key.path(), "common.InfoMinigamesLine");
                assert_eq!(cmd.locale.as_deref(), Some("de"));
                assert!(cmd.admin);
                assert_eq!(cmd.args, vec!["Spleef", "Last one standing"]);
            }
            other => panic!("Expected show, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_key_without_namespace() {
        assert!(Cli::try_parse_from(["mgmsg", "show", "Welcome"]).is_err());
    }

    #[test]
    fn test_set_requires_locale_and_lines() {
        assert!(Cli::try_parse_from(["mgmsg", "set", "arena.Welcome", "Hi"]).is_err());
        assert!(Cli::try_parse_from(["mgmsg", "set", "arena.Welcome", "--locale", "de"]).is_err());
        assert!(Cli::try_parse_from(["mgmsg", "set", "arena.Welcome", "--locale", "de", "Hallo"]).is_ok());
    }

    #[test]
    fn test_quiet_wins_log_level() {
        let cli = Cli::try_parse_from(["mgmsg", "-q", "list"]).unwrap();
        let settings = LogSettings {
            level: "debug".to_string(),
            ..LogSettings::default()
        };
        assert_eq!(cli.log_config(&settings).level, LogLevel::Error);
    }
}
