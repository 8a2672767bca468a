//! Meal subcommands: today's slate and logging a feeding.

use anyhow::Result;
use chrono::Local;
use clap::Subcommand;
use console::style;

use pawtrack_core::care::rollover_meals;
use pawtrack_core::sync::field::MealsField;
use pawtrack_types::fields::{time_label, FeedingRecord, MealSlot};

use crate::cli::finish_write;
use crate::state::AppState;

/// Meal subcommands.
#[derive(Subcommand)]
pub enum MealCommand {
    /// Show today's meal slate.
    Today,

    /// Log a feeding for one slot.
    Log {
        /// Meal slot (breakfast, lunch, dinner, snack).
        slot: String,

        /// Who fed the cat.
        #[arg(long)]
        by: String,
    },
}

/// Handle a meal subcommand.
pub async fn handle(cmd: MealCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        MealCommand::Today => today(state, json),
        MealCommand::Log { slot, by } => log(state, &slot, by, json).await,
    }
}

fn today(state: &AppState, json: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let meals = rollover_meals(state.engine.get::<MealsField>(), today);

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
        return Ok(());
    }

    println!();
    println!("  Meals for {}", style(&meals.date).cyan());
    println!();
    for slot in MealSlot::ALL {
        match meals.slot(slot) {
            Some(record) => println!(
                "  {} {:<9} {} at {}",
                style("✓").green(),
                slot.to_string(),
                record.fed_by,
                record.time
            ),
            None => println!("  {} {:<9} not yet", style("·").dim(), slot.to_string()),
        }
    }
    if meals.all_fed() {
        println!();
        println!("  {} All meals served. Happy cat!", style("★").yellow());
    }
    println!();

    Ok(())
}

async fn log(state: &AppState, slot: &str, by: String, json: bool) -> Result<()> {
    let slot: MealSlot = slot.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let now = Local::now();
    let today = now.date_naive();
    let record = FeedingRecord {
        fed_by: by.clone(),
        time: time_label(now.time()),
    };

    // Roll the slate over first so a stale date never keeps yesterday's
    // checkmarks.
    let record_for_slate = record.clone();
    let handle = state.engine.with::<MealsField>(move |slate| {
        let mut slate = rollover_meals(slate, today);
        slate.set_slot(slot, record_for_slate);
        slate
    });
    finish_write(state, handle).await?;

    let meals = state.engine.get::<MealsField>();
    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Logged {} by {} at {}",
        style("ok").green(),
        style(slot).cyan(),
        by,
        record.time
    );
    if meals.all_fed() {
        println!("  {} All meals served. Happy cat!", style("★").yellow());
    }
    println!();

    Ok(())
}
