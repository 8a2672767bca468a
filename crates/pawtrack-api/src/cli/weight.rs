//! Weight subcommands: recording measurements and the history view.

use anyhow::Result;
use chrono::Local;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use pawtrack_core::care::feeding_plan;
use pawtrack_core::sync::field::{FeedMultiplierField, WeightsField};
use pawtrack_types::fields::{entry_id_now, WeightEntry};

use crate::cli::{confirm_destructive, finish_write};
use crate::state::AppState;

/// Weight subcommands.
#[derive(Subcommand)]
pub enum WeightCommand {
    /// Record a new weight measurement.
    Add {
        /// Weight in kilograms (decimal comma accepted).
        kg: String,
    },

    /// Show the weight history, newest first.
    List,

    /// Remove a measurement (e.g. a mistyped entry).
    Remove {
        /// Entry id (see `paw weight list`).
        id: i64,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle a weight subcommand.
pub async fn handle(cmd: WeightCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        WeightCommand::Add { kg } => add(state, &kg, json).await,
        WeightCommand::List => list(state, json),
        WeightCommand::Remove { id, force } => remove(state, id, force, json).await,
    }
}

async fn add(state: &AppState, kg: &str, json: bool) -> Result<()> {
    let value: f64 = kg
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| anyhow::anyhow!("'{kg}' is not a valid weight in kg"))?;
    if value <= 0.0 || value >= 100.0 {
        anyhow::bail!("'{kg}' is out of range for a cat");
    }

    let entry = WeightEntry {
        id: entry_id_now(),
        value,
        date: Local::now().date_naive(),
    };

    let entry_for_list = entry.clone();
    let handle = state.engine.with::<WeightsField>(move |mut weights| {
        // Newest first
        weights.insert(0, entry_for_list);
        weights
    });
    finish_write(state, handle).await?;

    let multiplier = state.engine.get::<FeedMultiplierField>();
    let plan = feeding_plan(value, multiplier);

    if json {
        let out = serde_json::json!({
            "entry": entry,
            "feeding": {
                "daily_grams": plan.daily_grams,
                "per_meal_grams": plan.per_meal_grams,
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Recorded {} kg",
        style("ok").green(),
        style(format!("{value:.1}")).cyan()
    );
    println!(
        "  New food target: {} g/day ({} g per meal)",
        style(plan.daily_grams).bold(),
        plan.per_meal_grams
    );
    println!();

    Ok(())
}

fn list(state: &AppState, json: bool) -> Result<()> {
    let weights = state.engine.get::<WeightsField>();

    if json {
        println!("{}", serde_json::to_string_pretty(&weights)?);
        return Ok(());
    }

    println!();
    if weights.is_empty() {
        println!("  {} No weight recorded yet.", style("i").blue().bold());
        println!("     Record one with: paw weight add 4.2");
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Date").fg(Color::White),
        Cell::new("Weight (kg)").fg(Color::White),
    ]);
    for entry in &weights {
        table.add_row(vec![
            Cell::new(entry.id).fg(Color::DarkGrey),
            Cell::new(entry.date.format("%d/%m/%Y")).fg(Color::DarkGrey),
            Cell::new(format!("{:.1}", entry.value)).fg(Color::Cyan),
        ]);
    }
    println!("{table}");
    println!();

    Ok(())
}

async fn remove(state: &AppState, id: i64, force: bool, json: bool) -> Result<()> {
    let weights = state.engine.get::<WeightsField>();
    let Some(entry) = weights.iter().find(|w| w.id == id) else {
        anyhow::bail!("no weight entry with id {id}; see `paw weight list`");
    };

    let prompt = format!(
        "Delete the {:.1} kg measurement from {}?",
        entry.value,
        entry.date.format("%d/%m/%Y")
    );
    if !confirm_destructive(&prompt, force, json, "--force")? {
        return Ok(());
    }

    let handle = state.engine.with::<WeightsField>(move |mut weights| {
        weights.retain(|w| w.id != id);
        weights
    });
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "removed": id }))?
        );
    } else {
        println!();
        println!("  {} Measurement removed", style("ok").green());
        println!();
    }

    Ok(())
}
