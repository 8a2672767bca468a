//! Profile subcommands: show, edit, and the profile photo.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use console::style;

use pawtrack_core::care::age_on;
use pawtrack_core::sync::field::ProfileField;
use pawtrack_infra::media::downscale_to_data_uri;

use crate::cli::finish_write;
use crate::state::AppState;

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the profile card.
    Show,

    /// Edit profile fields (only the flags you pass change).
    Edit {
        /// Pet name.
        #[arg(long)]
        name: Option<String>,

        /// Nickname.
        #[arg(long)]
        nickname: Option<String>,

        /// Short bio.
        #[arg(long)]
        bio: Option<String>,

        /// Birth date (YYYY-MM-DD).
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },

    /// Set the profile photo from an image file.
    Photo {
        /// Path to a JPEG or PNG image.
        path: PathBuf,
    },
}

/// Handle a profile subcommand.
pub async fn handle(cmd: ProfileCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        ProfileCommand::Show => show(state, json),
        ProfileCommand::Edit {
            name,
            nickname,
            bio,
            birth_date,
        } => edit(state, name, nickname, bio, birth_date, json).await,
        ProfileCommand::Photo { path } => photo(state, &path, json).await,
    }
}

fn show(state: &AppState, json: bool) -> Result<()> {
    let profile = state.engine.get::<ProfileField>();
    let age = age_on(profile.birth_date, Local::now().date_naive());

    if json {
        let out = serde_json::json!({
            "name": profile.name,
            "nickname": profile.nickname,
            "bio": profile.bio,
            "birth_date": profile.birth_date,
            "age": { "months": age.months, "days": age.days },
            "has_photo": profile.image.is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&profile.name).cyan().bold(),
        style(format!("({})", profile.nickname)).dim()
    );
    println!("  Born {}  ·  {age}", profile.birth_date.format("%d/%m/%Y"));
    if !profile.bio.is_empty() {
        println!("  {}", style(&profile.bio).italic());
    }
    println!(
        "  Photo: {}",
        if profile.image.is_some() { "set" } else { "none" }
    );
    println!();

    Ok(())
}

async fn edit(
    state: &AppState,
    name: Option<String>,
    nickname: Option<String>,
    bio: Option<String>,
    birth_date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    if name.is_none() && nickname.is_none() && bio.is_none() && birth_date.is_none() {
        anyhow::bail!("nothing to change; pass at least one of --name/--nickname/--bio/--birth-date");
    }

    let handle = state.engine.with::<ProfileField>(move |mut profile| {
        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(nickname) = nickname {
            profile.nickname = nickname;
        }
        if let Some(bio) = bio {
            profile.bio = bio;
        }
        if let Some(birth_date) = birth_date {
            profile.birth_date = birth_date;
        }
        profile
    });
    finish_write(state, handle).await?;

    if !json {
        println!();
        println!("  {} Profile updated", style("ok").green());
        println!();
    }
    show(state, json)?;
    Ok(())
}

async fn photo(state: &AppState, path: &PathBuf, json: bool) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    let data_uri = downscale_to_data_uri(&bytes)?;
    let size = data_uri.len();

    let handle = state.engine.with::<ProfileField>(move |mut profile| {
        profile.image = Some(data_uri);
        profile
    });
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "photo_bytes": size }))?
        );
    } else {
        println!();
        println!(
            "  {} Profile photo set ({} KB embedded)",
            style("ok").green(),
            size / 1024
        );
        println!();
    }

    Ok(())
}
