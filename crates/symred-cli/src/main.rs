//! symred CLI application

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::debug;

use symred_cli::cli::{Cli, Commands};
use symred_cli::commands::config::load_configuration;
use symred_cli::exit::{EXIT_SUCCESS, exit_code_for};
use symred_cli::logging::setup_logging;

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {cause}");
            }
            exit_code_for(&e)
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_configuration(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    setup_logging(&config.logging)?;
    debug!(default_mode = %config.default_mode, "configuration loaded");

    match &cli.command {
        Some(Commands::Resolve(cmd)) => cmd.execute(&config),
        Some(Commands::Info(cmd)) => cmd.execute(&config),
        Some(Commands::Modes(cmd)) => cmd.execute(),
        Some(Commands::Config { action }) => action.execute(&config, cli.config.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
