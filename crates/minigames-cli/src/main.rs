//! Minigames message tool.
//!
//! Main entry point for the `mgmsg` binary.

use std::process::ExitCode;

use clap::Parser;
use minigames_cli::cli::Cli;
use minigames_cli::error::Exit;
use minigames_cli::CliError;
use minigames_common_config::{ConfigLoader, Environment};
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprintln!("{}", e.render());
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let data_dir = cli.resolve_data_dir();
    Environment::init_in(&data_dir)?;

    let loader = ConfigLoader::new(&data_dir);
    let config = loader.load()?;

    if let Err(e) = minigames_common_log::init(cli.log_config(&config.log)) {
        eprintln!("warning: {e}");
    }
    debug!(data_dir = %data_dir.display(), "configuration loaded");

    cli.execute(loader, config)
}
