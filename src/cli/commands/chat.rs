//! Interactive chat command.
//!
//! A video must be loaded before chatting; loading a new one replaces the
//! previous session wholesale.

use crate::acquire::Acquirer;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{Result, VidgistError};
use crate::session::AssistantSession;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(input: Option<String>, settings: Settings) -> Result<()> {
    let acquirer = Acquirer::new(settings.clone())?;
    let mut session: Option<AssistantSession> = None;

    println!("\n{}", style("Vidgist Chat").bold().cyan());
    println!(
        "{}\n",
        style("Use 'load <url>' to acquire a video, 'clear' to reset, 'exit' to quit.").dim()
    );

    if let Some(input) = input {
        session = load_video(&acquirer, &settings, &input).await;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if line.eq_ignore_ascii_case("clear") {
            let turns = session.take().map(|s| s.turn_count()).unwrap_or(0);
            Output::info(&format!("Session cleared ({} turns dropped).", turns));
            continue;
        }

        if let Some(url) = line.strip_prefix("load ") {
            // Replaces any previous session atomically
            session = load_video(&acquirer, &settings, url.trim()).await;
            continue;
        }

        match require_session(session.as_mut()) {
            Ok(active) => {
                let reply = active.send(line).await;
                println!("\n{} {}\n", style("Vidgist:").cyan().bold(), reply);
            }
            Err(e) => {
                Output::error(&e.to_string());
            }
        }
    }

    Ok(())
}

/// Guard for sending before any video has been loaded.
fn require_session(
    session: Option<&mut AssistantSession>,
) -> Result<&mut AssistantSession> {
    session.ok_or(VidgistError::SessionNotInitialized)
}

async fn load_video(
    acquirer: &Acquirer,
    settings: &Settings,
    input: &str,
) -> Option<AssistantSession> {
    match acquirer.acquire(input).await {
        Ok(record) => {
            Output::success(&format!(
                "Loaded \"{}\" [{}]",
                record.title,
                Output::provenance_badge(record.provenance)
            ));
            Some(AssistantSession::new(&record, settings))
        }
        Err(e) => {
            Output::error(&format!("Failed to acquire video: {}", e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_session_without_load() {
        let result = require_session(None);
        assert!(matches!(result, Err(VidgistError::SessionNotInitialized)));
    }
}
