//! Acquire command: run the cascade and display the record.

use crate::acquire::Acquirer;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::openai;
use crate::video::{format_timestamp, VideoRecord};

/// Run the acquire command.
pub async fn run_acquire(
    input: &str,
    json: bool,
    show_transcript: bool,
    settings: Settings,
) -> Result<()> {
    if !openai::is_api_key_configured() {
        Output::warning("OPENAI_API_KEY is not set; transcription and fabrication tiers will fail");
    }

    let acquirer = Acquirer::new(settings)?;
    let record = acquirer.acquire(input).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    print_summary(&record, show_transcript);
    Ok(())
}

fn print_summary(record: &VideoRecord, show_transcript: bool) {
    Output::header(&record.title);
    Output::kv("Platform", &record.platform.to_string());
    Output::kv("Author", &record.author);
    if let Some(category) = &record.category {
        Output::kv("Category", category);
    }
    Output::kv("Duration", &format_timestamp(record.duration_seconds as f64));
    Output::kv("Source", &Output::provenance_badge(record.provenance));
    if record.audio_truncated {
        Output::warning("Audio was truncated; later content is not represented");
    }

    if record.highlights.is_empty() {
        Output::info("No highlights available.");
    } else {
        Output::header("Highlights");
        for h in &record.highlights {
            let range = format!(
                "{} - {}",
                format_timestamp(h.start_seconds),
                format_timestamp(h.end_seconds)
            );
            let description = h
                .description
                .as_deref()
                .map(|d| format!(": {}", d))
                .unwrap_or_default();
            Output::list_item(&format!("[{}] {}{}", range, h.title, description));
        }
    }

    if show_transcript {
        if record.transcript.is_empty() {
            Output::info("No transcript available.");
        } else {
            Output::header("Transcript");
            println!("{}", record.transcript_lines());
        }
    }
}
