//! Sync status and manual refresh.

use anyhow::Result;
use clap::Subcommand;
use console::style;

use pawtrack_core::sync::{InitOutcome, RefreshOutcome};

use crate::state::AppState;

/// Sync subcommands.
#[derive(Subcommand)]
pub enum SyncCommand {
    /// Pull the remote document once, replacing local state.
    Refresh,
}

/// Handle the sync command; no subcommand shows the status.
pub async fn handle(cmd: Option<SyncCommand>, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        None => status(state, json),
        Some(SyncCommand::Refresh) => refresh(state, json).await,
    }
}

fn status(state: &AppState, json: bool) -> Result<()> {
    let status = state.engine.status();
    let endpoint = state.config.endpoint();

    if json {
        let out = serde_json::json!({
            "endpoint": endpoint,
            "offline": status.offline,
            "syncing": status.syncing,
            "revision": status.revision,
            "poll_interval_secs": state.config.poll_interval_secs,
            "init": match state.init_outcome {
                InitOutcome::Loaded => "loaded",
                InitOutcome::Bootstrapped => "bootstrapped",
                InitOutcome::OfflineDefaults => "offline_defaults",
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("── Sync ──").dim());
    println!("  Endpoint: {}", style(&endpoint).dim());
    println!(
        "  State:    {}",
        if status.offline {
            style("offline").yellow().bold()
        } else {
            style("online").green()
        }
    );
    println!("  Revision: {}", status.revision);
    match state.init_outcome {
        InitOutcome::Loaded => {}
        InitOutcome::Bootstrapped => {
            println!(
                "  {} The remote document was missing and has been bootstrapped.",
                style("i").blue().bold()
            );
        }
        InitOutcome::OfflineDefaults => {
            println!(
                "  {} Started offline; showing the built-in defaults.",
                style("!").yellow().bold()
            );
        }
    }
    println!();

    Ok(())
}

async fn refresh(state: &AppState, json: bool) -> Result<()> {
    let outcome = state.engine.refresh().await;

    if json {
        let out = serde_json::json!({
            "outcome": match outcome {
                RefreshOutcome::Replaced => "replaced",
                RefreshOutcome::Absent => "absent",
                RefreshOutcome::Failed => "failed",
            },
            "revision": state.engine.status().revision,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    match outcome {
        RefreshOutcome::Replaced => {
            println!(
                "  {} Pulled the latest document (revision {})",
                style("ok").green(),
                state.engine.status().revision
            );
        }
        RefreshOutcome::Absent => {
            println!(
                "  {} The remote document is absent; local state untouched.",
                style("i").blue().bold()
            );
        }
        RefreshOutcome::Failed => {
            println!(
                "  {} Could not reach the remote; now offline.",
                style("!").yellow().bold()
            );
        }
    }
    println!();

    Ok(())
}
