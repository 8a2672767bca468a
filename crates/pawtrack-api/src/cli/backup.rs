//! Backup subcommands: export and import of the full document.
//!
//! Import wholesale-overwrites the shared document for every device, so
//! it asks for confirmation; in `--json` mode the `--yes` flag is
//! required instead.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use console::style;

use pawtrack_core::backup;

use crate::cli::confirm_destructive;
use crate::state::AppState;

/// Backup subcommands.
#[derive(Subcommand)]
pub enum BackupCommand {
    /// Write the full document to a JSON file.
    Export {
        /// Destination file.
        path: PathBuf,
    },

    /// Replace the shared document with a backup file.
    Import {
        /// Backup file to restore.
        path: PathBuf,

        /// Skip confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a backup subcommand.
pub async fn handle(cmd: BackupCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        BackupCommand::Export { path } => export(state, &path, json),
        BackupCommand::Import { path, yes } => import(state, &path, yes, json).await,
    }
}

fn export(state: &AppState, path: &PathBuf, json: bool) -> Result<()> {
    backup::export(&state.engine.document(), path)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(
                &serde_json::json!({ "exported": path.display().to_string() })
            )?
        );
    } else {
        println!();
        println!(
            "  {} Backup written to {}",
            style("ok").green(),
            style(path.display()).cyan()
        );
        println!();
    }

    Ok(())
}

async fn import(state: &AppState, path: &PathBuf, yes: bool, json: bool) -> Result<()> {
    // Validate the file before asking anything.
    let document = backup::import(path)?;

    if !confirm_destructive(
        "Replace the shared document for every device with this backup?",
        yes,
        json,
        "--yes",
    )? {
        return Ok(());
    }

    state.engine.replace_all(document).await;

    if state.engine.is_offline() {
        anyhow::bail!("the backup was loaded locally but could not be uploaded");
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(
                &serde_json::json!({ "imported": path.display().to_string() })
            )?
        );
    } else {
        println!();
        println!("  {} Backup restored and uploaded", style("ok").green());
        println!();
    }

    Ok(())
}
