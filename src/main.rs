//! Vidgist CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidgist::cli::{commands, Cli, Commands};
use vidgist::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("vidgist={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    match &cli.command {
        Commands::Acquire {
            input,
            json,
            show_transcript,
        } => {
            commands::run_acquire(input, *json, *show_transcript, settings).await?;
        }

        Commands::Chat { input } => {
            commands::run_chat(input.clone(), settings).await?;
        }
    }

    Ok(())
}
