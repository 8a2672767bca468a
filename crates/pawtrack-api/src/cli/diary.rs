//! Diary subcommands: memories, plus the AI description rewrite.

use anyhow::Result;
use chrono::Local;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use pawtrack_core::sync::field::MemoriesField;
use pawtrack_types::fields::{entry_id_now, MemoryEntry};

use crate::cli::{confirm_destructive, finish_write};
use crate::state::AppState;

/// Diary subcommands.
#[derive(Subcommand)]
pub enum DiaryCommand {
    /// Add a memory.
    Add {
        /// Memory title.
        title: String,

        /// What happened.
        #[arg(long)]
        description: String,
    },

    /// List memories, newest first.
    List,

    /// Edit a memory's title or description.
    Edit {
        /// Memory id (see `paw diary list`).
        id: i64,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a memory.
    Remove {
        /// Memory id.
        id: i64,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Ask the assistant to rewrite a memory's description.
    Improve {
        /// Memory id.
        id: i64,

        /// Apply the rewrite without asking.
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a diary subcommand.
pub async fn handle(cmd: DiaryCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        DiaryCommand::Add { title, description } => add(state, title, description, json).await,
        DiaryCommand::List => list(state, json),
        DiaryCommand::Edit {
            id,
            title,
            description,
        } => edit(state, id, title, description, json).await,
        DiaryCommand::Remove { id, force } => remove(state, id, force, json).await,
        DiaryCommand::Improve { id, yes } => improve(state, id, yes, json).await,
    }
}

fn find_memory(state: &AppState, id: i64) -> Result<MemoryEntry> {
    state
        .engine
        .get::<MemoriesField>()
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow::anyhow!("no memory with id {id}; see `paw diary list`"))
}

async fn add(state: &AppState, title: String, description: String, json: bool) -> Result<()> {
    let memory = MemoryEntry {
        id: entry_id_now(),
        title: title.clone(),
        description,
        date: Local::now().date_naive(),
    };

    let memory_for_list = memory.clone();
    let handle = state.engine.with::<MemoriesField>(move |mut memories| {
        // Newest first
        memories.insert(0, memory_for_list);
        memories
    });
    finish_write(state, handle).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&memory)?);
    } else {
        println!();
        println!(
            "  {} Memory '{}' saved",
            style("ok").green(),
            style(&title).cyan()
        );
        println!();
    }

    Ok(())
}

fn list(state: &AppState, json: bool) -> Result<()> {
    let memories = state.engine.get::<MemoriesField>();

    if json {
        println!("{}", serde_json::to_string_pretty(&memories)?);
        return Ok(());
    }

    println!();
    if memories.is_empty() {
        println!("  {} The diary is empty.", style("i").blue().bold());
        println!("     Add a memory with: paw diary add \"Title\" --description \"...\"");
        println!();
        return Ok(());
    }

    for memory in &memories {
        println!(
            "  {} {}  {}",
            style(memory.date.format("%d/%m/%Y")).dim(),
            style(&memory.title).cyan().bold(),
            style(format!("(id {})", memory.id)).dim()
        );
        println!("    {}", memory.description);
        println!();
    }

    Ok(())
}

async fn edit(
    state: &AppState,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    if title.is_none() && description.is_none() {
        anyhow::bail!("nothing to change; pass --title and/or --description");
    }
    find_memory(state, id)?;

    let handle = state.engine.with::<MemoriesField>(move |mut memories| {
        if let Some(memory) = memories.iter_mut().find(|m| m.id == id) {
            if let Some(title) = title {
                memory.title = title;
            }
            if let Some(description) = description {
                memory.description = description;
            }
        }
        memories
    });
    finish_write(state, handle).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&find_memory(state, id)?)?);
    } else {
        println!();
        println!("  {} Memory updated", style("ok").green());
        println!();
    }

    Ok(())
}

async fn remove(state: &AppState, id: i64, force: bool, json: bool) -> Result<()> {
    let memory = find_memory(state, id)?;

    let prompt = format!("Delete memory '{}'?", memory.title);
    if !confirm_destructive(&prompt, force, json, "--force")? {
        return Ok(());
    }

    let handle = state.engine.with::<MemoriesField>(move |mut memories| {
        memories.retain(|m| m.id != id);
        memories
    });
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "removed": id }))?
        );
    } else {
        println!();
        println!("  {} Memory removed", style("ok").green());
        println!();
    }

    Ok(())
}

async fn improve(state: &AppState, id: i64, yes: bool, json: bool) -> Result<()> {
    let memory = find_memory(state, id)?;
    let assistant = state.assistant()?;

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message("rewriting...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let improved = assistant
        .improve_memory(&memory.title, &memory.description)
        .await;
    spinner.finish_and_clear();
    let improved = improved?;

    if !json {
        println!();
        println!("  {}", style("Before").dim());
        println!("    {}", memory.description);
        println!();
        println!("  {}", style("After").dim());
        println!("    {}", style(&improved).cyan());
        println!();
    }

    if json && !yes {
        anyhow::bail!("--json mode is non-interactive; pass --yes to apply the rewrite");
    }
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Keep the rewritten description?")
            .default(true)
            .interact()?;
        if !confirmed {
            println!("  Kept the original.");
            return Ok(());
        }
    }

    let improved_for_list = improved.clone();
    let handle = state.engine.with::<MemoriesField>(move |mut memories| {
        if let Some(memory) = memories.iter_mut().find(|m| m.id == id) {
            memory.description = improved_for_list;
        }
        memories
    });
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "id": id,
                "description": improved,
            }))?
        );
    } else {
        println!("  {} Memory rewritten", style("ok").green());
        println!();
    }

    Ok(())
}
