//! The daily dashboard command.

use anyhow::Result;
use chrono::{Local, Timelike};
use console::style;

use pawtrack_core::care::{
    age_on, feeding_plan, latest_weight_kg, litter_advisory, rollover_meals, solids_on,
};
use pawtrack_core::sync::field::{
    FeedMultiplierField, LitterLogsField, MealsField, ProfileField, StatusField, WeightsField,
};
use pawtrack_types::fields::MealSlot;

use crate::state::AppState;

/// Display the dashboard: profile, status, feeding plan, today's meals
/// and litter summary.
pub async fn home(state: &AppState, json: bool) -> Result<()> {
    let now = Local::now();
    let today = now.date_naive();

    let profile = state.engine.get::<ProfileField>();
    let status = state.engine.get::<StatusField>();
    let meals = rollover_meals(state.engine.get::<MealsField>(), today);
    let weights = state.engine.get::<WeightsField>();
    let multiplier = state.engine.get::<FeedMultiplierField>();
    let logs = state.engine.get::<LitterLogsField>();

    let weight = latest_weight_kg(&weights);
    let plan = feeding_plan(weight, multiplier);
    let age = age_on(profile.birth_date, today);
    let solids = solids_on(&logs, today);
    let advisory = litter_advisory(solids, now.hour());

    if json {
        let out = serde_json::json!({
            "name": profile.name,
            "nickname": profile.nickname,
            "age": { "months": age.months, "days": age.days },
            "status": status,
            "weight_kg": weight,
            "feeding": {
                "daily_grams": plan.daily_grams,
                "per_meal_grams": plan.per_meal_grams,
            },
            "meals": meals,
            "litter_solids_today": solids,
            "litter_advisory": advisory.map(|a| a.to_string()),
            "offline": state.engine.is_offline(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} {}",
        style("🐾").bold(),
        style(&profile.name).cyan().bold(),
        style(format!("({})", profile.nickname)).dim()
    );
    println!("  {age}  ·  {status}");
    println!();

    println!("  {}", style("── Feeding ──").dim());
    println!("  Weight:   {weight:.1} kg");
    println!(
        "  Food:     {} g/day  ({} g per meal)",
        style(plan.daily_grams).bold(),
        plan.per_meal_grams
    );
    println!();

    println!("  {}", style("── Meals today ──").dim());
    for slot in MealSlot::ALL {
        match meals.slot(slot) {
            Some(record) => println!(
                "  {} {:<9} {} at {}",
                style("✓").green(),
                slot.to_string(),
                record.fed_by,
                record.time
            ),
            None => println!("  {} {:<9}", style("·").dim(), slot.to_string()),
        }
    }
    if meals.all_fed() {
        println!();
        println!("  {} All meals served. Happy cat!", style("★").yellow());
    }
    println!();

    println!("  {}", style("── Litter ──").dim());
    println!("  Solid events today: {solids}");
    if let Some(advisory) = advisory {
        println!("  {}", style(advisory).yellow());
    }
    println!();

    if state.engine.is_offline() {
        println!(
            "  {} Offline: showing the last known state.",
            style("!").yellow().bold()
        );
        println!();
    }

    Ok(())
}
