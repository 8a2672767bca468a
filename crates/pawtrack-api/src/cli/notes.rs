//! Medical-notes subcommands: one shared free-text field.

use anyhow::Result;
use clap::Subcommand;
use console::style;

use pawtrack_core::sync::field::MedNotesField;

use crate::cli::finish_write;
use crate::state::AppState;

/// Notes subcommands.
#[derive(Subcommand)]
pub enum NotesCommand {
    /// Show the medical notes.
    Show,

    /// Replace the medical notes wholesale.
    Set {
        /// The new notes text (empty string clears them).
        text: String,
    },
}

/// Handle a notes subcommand.
pub async fn handle(cmd: NotesCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        NotesCommand::Show => show(state, json),
        NotesCommand::Set { text } => set(state, text, json).await,
    }
}

fn show(state: &AppState, json: bool) -> Result<()> {
    let notes = state.engine.get::<MedNotesField>();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "notes": notes }))?
        );
        return Ok(());
    }

    println!();
    if notes.is_empty() {
        println!("  {} No medical notes.", style("i").blue().bold());
        println!("     Set them with: paw notes set \"no dairy\"");
    } else {
        println!("  {}", style("Medical notes").cyan().bold());
        println!();
        for line in notes.lines() {
            println!("  {line}");
        }
    }
    println!();

    Ok(())
}

async fn set(state: &AppState, text: String, json: bool) -> Result<()> {
    let handle = state.engine.set::<MedNotesField>(&text);
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "notes": text }))?
        );
    } else {
        println!();
        if text.is_empty() {
            println!("  {} Medical notes cleared", style("ok").green());
        } else {
            println!("  {} Medical notes updated", style("ok").green());
        }
        println!();
    }

    Ok(())
}
