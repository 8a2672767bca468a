//! Litter-box subcommands: logging events and the recent-activity view.

use anyhow::Result;
use chrono::{Local, Timelike};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use pawtrack_core::care::{litter_advisory, solids_on, RECENT_LITTER_LIMIT};
use pawtrack_core::sync::field::LitterLogsField;
use pawtrack_types::fields::{entry_id_now, time_label, LitterKind, LitterLog};

use crate::cli::finish_write;
use crate::state::AppState;

/// Litter subcommands.
#[derive(Subcommand)]
pub enum LitterCommand {
    /// Log a litter-box event.
    Log {
        /// Event kind (normal, hard, soft, none).
        kind: String,
    },

    /// Show recent litter activity and today's tally.
    List,
}

/// Handle a litter subcommand.
pub async fn handle(cmd: LitterCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        LitterCommand::Log { kind } => log(state, &kind, json).await,
        LitterCommand::List => list(state, json),
    }
}

async fn log(state: &AppState, kind: &str, json: bool) -> Result<()> {
    let kind: LitterKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let now = Local::now();
    let entry = LitterLog {
        id: entry_id_now(),
        date: now.date_naive(),
        timestamp: time_label(now.time()),
        kind,
    };

    let entry_for_logs = entry.clone();
    let handle = state.engine.with::<LitterLogsField>(move |mut logs| {
        // Newest first
        logs.insert(0, entry_for_logs);
        logs
    });
    finish_write(state, handle).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Logged {} ({}) at {}",
        style("ok").green(),
        style(kind).cyan(),
        kind.label(),
        entry.timestamp
    );
    let logs = state.engine.get::<LitterLogsField>();
    let solids = solids_on(&logs, now.date_naive());
    if let Some(advisory) = litter_advisory(solids, now.hour()) {
        println!("  {}", style(advisory).yellow());
    }
    println!();

    Ok(())
}

fn list(state: &AppState, json: bool) -> Result<()> {
    let now = Local::now();
    let logs = state.engine.get::<LitterLogsField>();
    let solids = solids_on(&logs, now.date_naive());
    let recent: Vec<_> = logs.iter().take(RECENT_LITTER_LIMIT).collect();

    if json {
        let out = serde_json::json!({
            "recent": recent,
            "solids_today": solids,
            "advisory": litter_advisory(solids, now.hour()).map(|a| a.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    if recent.is_empty() {
        println!("  {} No litter events logged yet.", style("i").blue().bold());
        println!("     Log one with: paw litter log normal");
        println!();
        return Ok(());
    }

    println!("  Recent litter activity ({solids} solid events today)");
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Date").fg(Color::White),
        Cell::new("Time").fg(Color::White),
        Cell::new("Kind").fg(Color::White),
    ]);
    for entry in &recent {
        table.add_row(vec![
            Cell::new(entry.date.format("%d/%m/%Y")).fg(Color::DarkGrey),
            Cell::new(&entry.timestamp),
            Cell::new(entry.kind.label()).fg(Color::Cyan),
        ]);
    }
    println!("{table}");

    if let Some(advisory) = litter_advisory(solids, now.hour()) {
        println!();
        println!("  {}", style(advisory).yellow());
    }
    println!();

    Ok(())
}
