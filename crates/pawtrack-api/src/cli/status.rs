//! The activity-status command.

use anyhow::Result;
use console::style;

use pawtrack_core::sync::field::StatusField;
use pawtrack_types::fields::STATUS_PRESETS;

use crate::cli::finish_write;
use crate::state::AppState;

/// Show or set the activity status. Any free text is accepted; the
/// presets are only suggestions.
pub async fn handle(
    state: &AppState,
    value: Option<String>,
    presets: bool,
    json: bool,
) -> Result<()> {
    if presets {
        if json {
            println!("{}", serde_json::to_string_pretty(&STATUS_PRESETS)?);
        } else {
            println!();
            for preset in STATUS_PRESETS {
                println!("  {} {preset}", style("·").dim());
            }
            println!();
        }
        return Ok(());
    }

    if let Some(value) = value {
        if value.trim().is_empty() {
            anyhow::bail!("status cannot be empty");
        }
        let handle = state.engine.set::<StatusField>(&value);
        finish_write(state, handle).await?;
    }

    let current = state.engine.get::<StatusField>();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "status": current }))?
        );
    } else {
        println!();
        println!("  Status: {}", style(&current).cyan().bold());
        println!();
    }

    Ok(())
}
