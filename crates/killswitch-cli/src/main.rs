//! CLI entry point - the composition root.
//!
//! Configuration is resolved and the runtime wired via `bootstrap`; command
//! dispatch routes to handlers, whose return value becomes the exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use killswitch_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};
use killswitch_core::default_state_file;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    match cli.command {
        Commands::Kill {
            files,
            graceful_timeout_ms,
        } => {
            let ctx = bootstrap(CliConfig::resolve(&files, graceful_timeout_ms)?)?;
            handlers::kill::execute(&ctx, cli.json).await
        }
        Commands::Status { files } => {
            let ctx = bootstrap(CliConfig::resolve(&files, None)?)?;
            handlers::status::execute(&ctx, cli.json)
        }
        Commands::Snapshot { state_file } => {
            let state_file = match state_file {
                Some(path) => path,
                None => default_state_file().map_err(CliError::from)?,
            };
            handlers::snapshot::execute(&state_file, cli.json)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::from(err.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}
