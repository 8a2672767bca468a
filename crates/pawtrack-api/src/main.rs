//! Pawtrack CLI entry point.
//!
//! Binary name: `paw`
//!
//! Parses CLI arguments, loads configuration, connects the sync engine
//! to the shared document, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use pawtrack_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,pawtrack=debug",
        _ => "trace",
    };
    init_tracing(cli.otel, filter).map_err(|err| anyhow::anyhow!("{err}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "paw", &mut std::io::stdout());
        return Ok(());
    }

    // Load config and perform the initial document load/bootstrap
    let state = AppState::init().await?;

    match cli.command {
        Commands::Home => {
            cli::home::home(&state, cli.json).await?;
        }
        Commands::Profile { action } => {
            cli::profile::handle(action, &state, cli.json).await?;
        }
        Commands::Meal { action } => {
            cli::meal::handle(action, &state, cli.json).await?;
        }
        Commands::Litter { action } => {
            cli::litter::handle(action, &state, cli.json).await?;
        }
        Commands::Weight { action } => {
            cli::weight::handle(action, &state, cli.json).await?;
        }
        Commands::Vaccine { action } => {
            cli::vaccine::handle(action, &state, cli.json).await?;
        }
        Commands::Notes { action } => {
            cli::notes::handle(action, &state, cli.json).await?;
        }
        Commands::Diary { action } => {
            cli::diary::handle(action, &state, cli.json).await?;
        }
        Commands::Album { action } => {
            cli::album::handle(action, &state, cli.json).await?;
        }
        Commands::Family { action } => {
            cli::family::handle(action, &state, cli.json).await?;
        }
        Commands::Feed => {
            cli::feed::feed(&state, cli.json)?;
        }
        Commands::Status { value, presets } => {
            cli::status::handle(&state, value, presets, cli.json).await?;
        }
        Commands::Theme { value } => {
            cli::theme::handle(&state, value, cli.json).await?;
        }
        Commands::Backup { action } => {
            cli::backup::handle(action, &state, cli.json).await?;
        }
        Commands::Chat { message } => {
            cli::chat::handle(&state, message).await?;
        }
        Commands::Sync { action } => {
            cli::sync::handle(action, &state, cli.json).await?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    shutdown_tracing();
    Ok(())
}
