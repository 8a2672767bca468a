//! The feeding-plan command.

use anyhow::Result;
use console::style;

use pawtrack_core::care::{feeding_plan, latest_weight_kg, FALLBACK_WEIGHT_KG};
use pawtrack_core::sync::field::{FeedMultiplierField, WeightsField};

use crate::state::AppState;

/// Show today's feeding plan from the latest weight and the multiplier.
pub fn feed(state: &AppState, json: bool) -> Result<()> {
    let weights = state.engine.get::<WeightsField>();
    let multiplier = state.engine.get::<FeedMultiplierField>();
    let weight = latest_weight_kg(&weights);
    let plan = feeding_plan(weight, multiplier);

    if json {
        let out = serde_json::json!({
            "weight_kg": weight,
            "multiplier": multiplier,
            "daily_grams": plan.daily_grams,
            "per_meal_grams": plan.per_meal_grams,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} g/day  ({} g per meal)",
        style("🍗").bold(),
        style(plan.daily_grams).cyan().bold(),
        plan.per_meal_grams
    );
    println!(
        "  Based on {weight:.1} kg at {multiplier} g/kg",
    );
    if weights.is_empty() {
        println!(
            "  {} No weight recorded; using the {FALLBACK_WEIGHT_KG} kg fallback.",
            style("i").blue().bold()
        );
    }
    println!();

    Ok(())
}
