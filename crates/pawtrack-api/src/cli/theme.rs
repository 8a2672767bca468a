//! The UI-theme command. The preference lives in the shared document so
//! every device follows it.

use anyhow::Result;
use console::style;

use pawtrack_core::sync::field::ThemeField;
use pawtrack_types::fields::Theme;

use crate::cli::finish_write;
use crate::state::AppState;

/// Show or set the theme.
pub async fn handle(state: &AppState, value: Option<String>, json: bool) -> Result<()> {
    if let Some(value) = value {
        let theme: Theme = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        let handle = state.engine.set::<ThemeField>(&theme);
        finish_write(state, handle).await?;
    }

    let current = state.engine.get::<ThemeField>();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "theme": current }))?
        );
    } else {
        println!();
        println!("  Theme: {}", style(current).cyan());
        println!();
    }

    Ok(())
}
