//! `logflux` -- WAF false-positive feedback triage CLI
//!
//! Loads `logflux.toml` (or defaults), initializes logging and dispatches
//! to one handler per subcommand. Errors are printed to stderr and mapped
//! to process exit codes via [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);
    let config_path = cli.config.as_deref();

    // `config validate` reports load failures itself, so logging falls back to defaults.
    let mut config = match (&cli.command, commands::config::load_effective(config_path).await) {
        (_, Ok(config)) => config,
        (Commands::Config(_), Err(_)) => logflux_core::config::LogfluxConfig::default(),
        (_, Err(e)) => return Err(e),
    };

    if let Some(level) = cli.log_level {
        config.general.log_level = level;
    }
    logging::init_tracing(&config.general).map_err(|e| CliError::Config(e.to_string()))?;
    debug!(source = ?config_path, "configuration loaded");

    match cli.command {
        Commands::Suggest(args) => commands::suggest::execute(args, &config, &writer).await,
        Commands::Draft(args) => commands::draft::execute(args, &config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, config_path, &writer).await,
    }
}
