//! CLI command definitions and dispatch for the `paw` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! noun-verb pattern (e.g., `paw meal log`, `paw diary list`).

pub mod album;
pub mod backup;
pub mod chat;
pub mod diary;
pub mod family;
pub mod feed;
pub mod home;
pub mod litter;
pub mod meal;
pub mod notes;
pub mod profile;
pub mod status;
pub mod sync;
pub mod theme;
pub mod vaccine;
pub mod weight;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use console::style;
use dialoguer::Confirm;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Track your cat's day, shared with the whole family.
#[derive(Parser)]
#[command(name = "paw", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export OpenTelemetry spans to stdout (local development).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Daily dashboard: profile, status, feeding plan, meals, litter.
    Home,

    /// Show or edit the pet profile.
    Profile {
        #[command(subcommand)]
        action: profile::ProfileCommand,
    },

    /// Log and inspect today's meals.
    Meal {
        #[command(subcommand)]
        action: meal::MealCommand,
    },

    /// Log and review litter-box events.
    Litter {
        #[command(subcommand)]
        action: litter::LitterCommand,
    },

    /// Track weight measurements.
    Weight {
        #[command(subcommand)]
        action: weight::WeightCommand,
    },

    /// Manage the vaccination plan.
    Vaccine {
        #[command(subcommand)]
        action: vaccine::VaccineCommand,
    },

    /// Show or replace the shared medical notes.
    Notes {
        #[command(subcommand)]
        action: notes::NotesCommand,
    },

    /// The diary of memories.
    Diary {
        #[command(subcommand)]
        action: diary::DiaryCommand,
    },

    /// The photo album.
    Album {
        #[command(subcommand)]
        action: album::AlbumCommand,
    },

    /// Family members and the feed multiplier.
    Family {
        #[command(subcommand)]
        action: family::FamilyCommand,
    },

    /// Show today's feeding plan.
    Feed,

    /// Show or set the activity status.
    Status {
        /// New status text; shows the current status when omitted.
        value: Option<String>,

        /// List the one-tap status presets.
        #[arg(long)]
        presets: bool,
    },

    /// Show or set the UI theme (light, dark).
    Theme {
        /// New theme; shows the current theme when omitted.
        value: Option<String>,
    },

    /// Export or import the full document as a JSON file.
    Backup {
        #[command(subcommand)]
        action: backup::BackupCommand,
    },

    /// Chat with the AI cat assistant.
    Chat {
        /// One-shot question; starts an interactive session when omitted.
        message: Option<String>,
    },

    /// Show sync status or force a refresh.
    Sync {
        #[command(subcommand)]
        action: Option<sync::SyncCommand>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Await an outbound PUT and surface a failed upload to the user.
///
/// A CLI invocation exits right after the command, so a dropped write
/// would be lost silently; every mutating command routes through here.
pub(crate) async fn finish_write(state: &AppState, handle: JoinHandle<()>) -> anyhow::Result<()> {
    handle.await?;
    if state.engine.is_offline() {
        eprintln!(
            "\n  {} Could not reach the shared document; the change was not uploaded.",
            style("!").yellow().bold()
        );
    }
    Ok(())
}

/// Gate for operations that delete or overwrite shared data.
///
/// Interactive runs ask through a prompt. `--json` runs have no terminal
/// dialogue, so the skip flag must be passed explicitly; anything else is
/// an error, never a silent go-ahead.
pub(crate) fn confirm_destructive(
    prompt: &str,
    skip_prompt: bool,
    json: bool,
    skip_flag: &str,
) -> anyhow::Result<bool> {
    if skip_prompt {
        return Ok(true);
    }
    if json {
        anyhow::bail!("--json mode is non-interactive; pass {skip_flag} to confirm");
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    if !confirmed {
        println!("  Cancelled.");
    }
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_remove_parses_with_force() {
        let cli = Cli::try_parse_from(["paw", "weight", "remove", "12", "--force"]).unwrap();
        match cli.command {
            Commands::Weight {
                action: weight::WeightCommand::Remove { id, force },
            } => {
                assert_eq!(id, 12);
                assert!(force);
            }
            _ => panic!("parsed into the wrong command"),
        }
    }

    #[test]
    fn json_mode_requires_the_skip_flag_for_destructive_ops() {
        let err = confirm_destructive("Replace everything?", false, true, "--yes").unwrap_err();
        assert!(err.to_string().contains("--yes"));
    }

    #[test]
    fn skip_flag_bypasses_the_prompt_in_any_mode() {
        assert!(confirm_destructive("Replace everything?", true, true, "--yes").unwrap());
        assert!(confirm_destructive("Replace everything?", true, false, "--force").unwrap());
    }
}
