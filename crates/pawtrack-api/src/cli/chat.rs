//! Chat with the AI cat assistant.
//!
//! One-shot mode answers a single question. Interactive mode keeps the
//! conversation history in memory for the session and runs the
//! background poller so a long chat still follows the shared document.

use anyhow::Result;
use console::style;
use dialoguer::Input;
use tokio_util::sync::CancellationToken;

use pawtrack_core::sync::field::ProfileField;
use pawtrack_types::assistant::ChatMessage;

use crate::state::AppState;

/// Handle the chat command.
pub async fn handle(state: &AppState, message: Option<String>) -> Result<()> {
    match message {
        Some(message) => one_shot(state, &message).await,
        None => interactive(state).await,
    }
}

async fn one_shot(state: &AppState, message: &str) -> Result<()> {
    let assistant = state.assistant()?;
    let profile = state.engine.get::<ProfileField>();
    let history = [ChatMessage::user(message)];

    let spinner = thinking_spinner();
    let reply = assistant.chat(&profile, &history).await;
    spinner.finish_and_clear();

    println!();
    println!("  {}", reply?);
    println!();
    Ok(())
}

async fn interactive(state: &AppState) -> Result<()> {
    let assistant = state.assistant()?;
    let profile = state.engine.get::<ProfileField>();

    // Keep following the shared document while the chat is open.
    let cancel = CancellationToken::new();
    let poller = state.engine.spawn_poller(state.poll_period(), cancel.clone());

    println!();
    println!(
        "  {} Chatting about {}. Type 'exit' to leave.",
        style("🐱").bold(),
        style(&profile.name).cyan()
    );
    println!();

    let mut history: Vec<ChatMessage> = Vec::new();
    loop {
        let line: String = Input::new().with_prompt("  you").interact_text()?;
        let line = line.trim().to_string();
        if line.is_empty() || line == "exit" || line == "quit" {
            break;
        }

        history.push(ChatMessage::user(line));

        let spinner = thinking_spinner();
        let reply = assistant.chat(&profile, &history).await;
        spinner.finish_and_clear();

        match reply {
            Ok(text) => {
                println!();
                println!("  {} {}", style(&profile.nickname).cyan().bold(), text);
                println!();
                history.push(ChatMessage::model(text));
            }
            Err(err) => {
                // The failed turn stays out of the history so a retry
                // sends a clean conversation.
                history.pop();
                eprintln!();
                eprintln!("  {} {err}", style("!").yellow().bold());
                eprintln!();
            }
        }
    }

    cancel.cancel();
    let _ = poller.await;

    println!("  Bye!");
    Ok(())
}

fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
