//! Family subcommands: the list of owners and the feed multiplier.

use anyhow::Result;
use clap::Subcommand;
use console::style;

use pawtrack_core::care::{feeding_plan, latest_weight_kg};
use pawtrack_core::sync::field::{FeedMultiplierField, OwnersField, WeightsField};

use crate::cli::finish_write;
use crate::state::AppState;

/// Family subcommands.
#[derive(Subcommand)]
pub enum FamilyCommand {
    /// List family members.
    List,

    /// Add a family member.
    Add {
        /// Member name.
        name: String,
    },

    /// Remove a family member.
    Remove {
        /// Member name.
        name: String,
    },

    /// Show or set the feed multiplier (grams of food per kg of cat).
    Multiplier {
        /// New multiplier; shows the current one when omitted.
        value: Option<u32>,
    },
}

/// Handle a family subcommand.
pub async fn handle(cmd: FamilyCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        FamilyCommand::List => list(state, json),
        FamilyCommand::Add { name } => add(state, name, json).await,
        FamilyCommand::Remove { name } => remove(state, name, json).await,
        FamilyCommand::Multiplier { value } => multiplier(state, value, json).await,
    }
}

fn list(state: &AppState, json: bool) -> Result<()> {
    let owners = state.engine.get::<OwnersField>();

    if json {
        println!("{}", serde_json::to_string_pretty(&owners)?);
        return Ok(());
    }

    println!();
    println!("  Family ({} members)", owners.len());
    println!();
    for owner in &owners {
        println!("  {} {}", style("·").dim(), style(owner).cyan());
    }
    println!();

    Ok(())
}

async fn add(state: &AppState, name: String, json: bool) -> Result<()> {
    let owners = state.engine.get::<OwnersField>();
    if owners.iter().any(|o| o == &name) {
        anyhow::bail!("'{name}' is already a family member");
    }

    let name_for_list = name.clone();
    let handle = state.engine.with::<OwnersField>(move |mut owners| {
        owners.push(name_for_list);
        owners
    });
    finish_write(state, handle).await?;

    if !json {
        println!();
        println!("  {} Welcome, {}!", style("ok").green(), style(&name).cyan());
        println!();
    }
    list(state, json)?;
    Ok(())
}

async fn remove(state: &AppState, name: String, json: bool) -> Result<()> {
    let owners = state.engine.get::<OwnersField>();
    if !owners.iter().any(|o| o == &name) {
        anyhow::bail!("'{name}' is not a family member");
    }

    let name_for_list = name.clone();
    let handle = state.engine.with::<OwnersField>(move |mut owners| {
        owners.retain(|o| o != &name_for_list);
        owners
    });
    finish_write(state, handle).await?;

    if !json {
        println!();
        println!("  {} Removed {}", style("ok").green(), style(&name).cyan());
        println!();
    }
    list(state, json)?;
    Ok(())
}

async fn multiplier(state: &AppState, value: Option<u32>, json: bool) -> Result<()> {
    if let Some(value) = value {
        if value == 0 || value > 200 {
            anyhow::bail!("multiplier must be between 1 and 200 g/kg");
        }
        let handle = state.engine.set::<FeedMultiplierField>(&value);
        finish_write(state, handle).await?;
    }

    let current = state.engine.get::<FeedMultiplierField>();
    let weights = state.engine.get::<WeightsField>();
    let plan = feeding_plan(latest_weight_kg(&weights), current);

    if json {
        let out = serde_json::json!({
            "multiplier": current,
            "daily_grams": plan.daily_grams,
            "per_meal_grams": plan.per_meal_grams,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  Feed multiplier: {} g/kg  ->  {} g/day ({} g per meal)",
        style(current).bold(),
        plan.daily_grams,
        plan.per_meal_grams
    );
    println!();

    Ok(())
}
