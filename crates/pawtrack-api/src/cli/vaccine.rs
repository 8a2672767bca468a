//! Vaccination-plan subcommands.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use pawtrack_core::sync::field::VaccinesField;
use pawtrack_types::fields::{entry_id_now, Vaccine};

use crate::cli::finish_write;
use crate::state::AppState;

/// Vaccine subcommands.
#[derive(Subcommand)]
pub enum VaccineCommand {
    /// Add a vaccine to the plan.
    Add {
        /// Vaccine name.
        name: String,

        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: NaiveDate,
    },

    /// Mark a vaccine as administered.
    Done {
        /// Vaccine id (see `paw vaccine list`).
        id: i64,
    },

    /// Remove a vaccine from the plan.
    Remove {
        /// Vaccine id.
        id: i64,
    },

    /// Show the vaccination plan.
    List,
}

/// Handle a vaccine subcommand.
pub async fn handle(cmd: VaccineCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        VaccineCommand::Add { name, due } => add(state, name, due, json).await,
        VaccineCommand::Done { id } => done(state, id, json).await,
        VaccineCommand::Remove { id } => remove(state, id, json).await,
        VaccineCommand::List => list(state, json),
    }
}

async fn add(state: &AppState, name: String, due: NaiveDate, json: bool) -> Result<()> {
    let vaccine = Vaccine {
        id: entry_id_now(),
        name: name.clone(),
        due_date: due,
        administered: false,
    };

    let vaccine_for_list = vaccine.clone();
    let handle = state.engine.with::<VaccinesField>(move |mut vaccines| {
        vaccines.push(vaccine_for_list);
        vaccines.sort_by_key(|v| v.due_date);
        vaccines
    });
    finish_write(state, handle).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&vaccine)?);
    } else {
        println!();
        println!(
            "  {} Added '{}' due {}",
            style("ok").green(),
            style(&name).cyan(),
            due.format("%d/%m/%Y")
        );
        println!();
    }

    Ok(())
}

async fn done(state: &AppState, id: i64, json: bool) -> Result<()> {
    let vaccines = state.engine.get::<VaccinesField>();
    let Some(vaccine) = vaccines.iter().find(|v| v.id == id) else {
        anyhow::bail!("no vaccine with id {id}; see `paw vaccine list`");
    };
    let name = vaccine.name.clone();

    let handle = state.engine.with::<VaccinesField>(move |mut vaccines| {
        if let Some(v) = vaccines.iter_mut().find(|v| v.id == id) {
            v.administered = true;
        }
        vaccines
    });
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "id": id, "administered": true }))?
        );
    } else {
        println!();
        println!(
            "  {} '{}' marked administered",
            style("ok").green(),
            style(&name).cyan()
        );
        println!();
    }

    Ok(())
}

async fn remove(state: &AppState, id: i64, json: bool) -> Result<()> {
    let vaccines = state.engine.get::<VaccinesField>();
    if !vaccines.iter().any(|v| v.id == id) {
        anyhow::bail!("no vaccine with id {id}; see `paw vaccine list`");
    }

    let handle = state.engine.with::<VaccinesField>(move |mut vaccines| {
        vaccines.retain(|v| v.id != id);
        vaccines
    });
    finish_write(state, handle).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "removed": id }))?
        );
    } else {
        println!();
        println!("  {} Vaccine removed", style("ok").green());
        println!();
    }

    Ok(())
}

fn list(state: &AppState, json: bool) -> Result<()> {
    let vaccines = state.engine.get::<VaccinesField>();

    if json {
        println!("{}", serde_json::to_string_pretty(&vaccines)?);
        return Ok(());
    }

    println!();
    if vaccines.is_empty() {
        println!("  {} No vaccines on the plan.", style("i").blue().bold());
        println!("     Add one with: paw vaccine add \"Annual booster\" --due 2027-04-25");
        println!();
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Vaccine").fg(Color::White),
        Cell::new("Due").fg(Color::White),
        Cell::new("Status").fg(Color::White),
    ]);
    for vaccine in &vaccines {
        let status = if vaccine.administered {
            Cell::new("done").fg(Color::Green)
        } else if vaccine.due_date < today {
            Cell::new("overdue").fg(Color::Red)
        } else {
            Cell::new("upcoming").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(vaccine.id).fg(Color::DarkGrey),
            Cell::new(&vaccine.name).fg(Color::Cyan),
            Cell::new(vaccine.due_date.format("%d/%m/%Y")),
            status,
        ]);
    }
    println!("{table}");
    println!();

    Ok(())
}
