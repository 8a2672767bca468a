//! Album subcommands: photos, plus the AI image edit.
//!
//! `album edit` sends a photo and an instruction to the assistant. The
//! model may answer with text only; in that case nothing is appended and
//! the user gets a message, not an error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use console::style;

use pawtrack_core::sync::field::AlbumField;
use pawtrack_infra::media::{decode_data_uri, downscale_to_data_uri};
use pawtrack_types::fields::{entry_id_now, AlbumPhoto};

use crate::cli::{confirm_destructive, finish_write};
use crate::state::AppState;

/// Album subcommands.
#[derive(Subcommand)]
pub enum AlbumCommand {
    /// Add a photo from an image file.
    Add {
        /// Path to a JPEG or PNG image.
        path: PathBuf,

        /// Caption for the photo.
        #[arg(long, default_value = "")]
        caption: String,
    },

    /// List album photos, newest first.
    List,

    /// Remove a photo.
    Remove {
        /// Photo id (see `paw album list`).
        id: i64,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Ask the assistant to generate an edited version of a photo.
    /// The result is appended as a new photo; the original stays.
    Edit {
        /// Photo id.
        id: i64,

        /// What to change (e.g. "add a tiny wizard hat").
        instruction: String,
    },
}

/// Handle an album subcommand.
pub async fn handle(cmd: AlbumCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        AlbumCommand::Add { path, caption } => add(state, &path, caption, json).await,
        AlbumCommand::List => list(state, json),
        AlbumCommand::Remove { id, force } => remove(state, id, force, json).await,
        AlbumCommand::Edit { id, instruction } => edit(state, id, &instruction, json).await,
    }
}

fn find_photo(state: &AppState, id: i64) -> Result<AlbumPhoto> {
    state
        .engine
        .get::<AlbumField>()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow::anyhow!("no photo with id {id}; see `paw album list`"))
}

async fn push_photo(state: &AppState, photo: AlbumPhoto) -> Result<()> {
    let handle = state.engine.with::<AlbumField>(move |mut album| {
        // Newest first
        album.insert(0, photo);
        album
    });
    finish_write(state, handle).await
}

async fn add(state: &AppState, path: &PathBuf, caption: String, json: bool) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    let photo = AlbumPhoto {
        id: entry_id_now(),
        image: downscale_to_data_uri(&bytes)?,
        date: Local::now().date_naive(),
        caption: caption.clone(),
    };
    let id = photo.id;
    push_photo(state, photo).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "id": id, "caption": caption }))?
        );
    } else {
        println!();
        println!("  {} Photo added (id {})", style("ok").green(), id);
        println!();
    }

    Ok(())
}

fn list(state: &AppState, json: bool) -> Result<()> {
    let album = state.engine.get::<AlbumField>();

    if json {
        // Omit the image payloads; they dwarf everything else.
        let out: Vec<_> = album
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "date": p.date,
                    "caption": p.caption,
                    "bytes": p.image.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    if album.is_empty() {
        println!("  {} The album is empty.", style("i").blue().bold());
        println!("     Add a photo with: paw album add photo.jpg --caption \"...\"");
        println!();
        return Ok(());
    }

    println!("  Album ({} photos)", album.len());
    println!();
    for photo in &album {
        let caption = if photo.caption.is_empty() {
            style("(no caption)").dim().to_string()
        } else {
            photo.caption.clone()
        };
        println!(
            "  {} {}  {}  {}",
            style("📷").bold(),
            style(photo.date.format("%d/%m/%Y")).dim(),
            caption,
            style(format!("(id {})", photo.id)).dim()
        );
    }
    println!();

    Ok(())
}

async fn remove(state: &AppState, id: i64, force: bool, json: bool) -> Result<()> {
    find_photo(state, id)?;

    if !confirm_destructive("Delete this photo?", force, json, "--force")? {
        return Ok(());
    }

    let handle = state.engine.with::<AlbumField>(move |mut album| {
        album.retain(|p| p.id != id);
        album
    });
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "removed": id }))?
        );
    } else {
        println!();
        println!("  {} Photo removed", style("ok").green());
        println!();
    }

    Ok(())
}

async fn edit(state: &AppState, id: i64, instruction: &str, json: bool) -> Result<()> {
    let photo = find_photo(state, id)?;
    let image = decode_data_uri(&photo.image)
        .map_err(|err| anyhow::anyhow!("photo {id} has an unusable image payload: {err}"))?;
    let assistant = state.assistant()?;

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message("generating...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = assistant.edit_photo(image, instruction).await;
    spinner.finish_and_clear();

    let Some(generated) = result? else {
        // Soft failure: the model replied without an image.
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "generated": false }))?
            );
        } else {
            println!();
            println!(
                "  {} The model produced no image; the album is unchanged.",
                style("!").yellow().bold()
            );
            println!();
        }
        return Ok(());
    };

    // Generated output goes through the same downscaling as uploads.
    let edited = AlbumPhoto {
        id: entry_id_now(),
        image: downscale_to_data_uri(&generated.data)?,
        date: Local::now().date_naive(),
        caption: format!("AI Edit: {instruction}"),
    };
    let new_id = edited.id;
    push_photo(state, edited).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "generated": true,
                "id": new_id,
            }))?
        );
    } else {
        println!();
        println!(
            "  {} Edited photo appended (id {})",
            style("ok").green(),
            new_id
        );
        println!();
    }

    Ok(())
}
