//! CLI module for vidgist.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Vidgist - Video Transcript and Highlight Acquisition
///
/// Turns a video URL into a transcript, topical highlights, and an
/// interactive assistant conversation, degrading gracefully when captions
/// or audio are unavailable.
#[derive(Parser, Debug)]
#[command(name = "vidgist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Acquire a transcript and highlights for a video URL or ID
    Acquire {
        /// Video URL or bare platform ID (YouTube, Bilibili)
        input: String,

        /// Emit the full record as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Also print the transcript as `timestamp - text` lines
        #[arg(short = 't', long)]
        show_transcript: bool,
    },

    /// Start an interactive chat session about a video
    Chat {
        /// Video URL or ID to load immediately (otherwise use `load <url>`)
        input: Option<String>,
    },
}
