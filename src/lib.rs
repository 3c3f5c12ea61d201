//! Vidgist - Video Transcript and Highlight Acquisition
//!
//! A CLI tool that turns a video URL into a transcript, a set of topical
//! highlights, and an interactive assistant conversation.
//!
//! # Overview
//!
//! Given a URL (or a bare video ID) from a supported platform, vidgist:
//! - Resolves metadata (title, author, duration, thumbnail)
//! - Acquires a transcript through an ordered cascade of quality tiers:
//!   official captions, machine transcription of downloaded audio, and
//!   finally pure fabrication from metadata
//! - Segments any transcript into labeled, timestamped highlights
//! - Tags the result with a provenance badge so consumers can tell ground
//!   truth from machine output from fabricated content
//! - Seeds an assistant chat session from the acquired transcript
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `platform` - URL classification into platform + video ID
//! - `video` - Core data model (records, segments, highlights, provenance)
//! - `source` - Per-platform capability sets (metadata, captions, audio)
//! - `transcribe` - Audio download fallback and speech transcription
//! - `fabricate` - Metadata-only content fabrication
//! - `highlights` - Highlight synthesis from transcript text
//! - `acquire` - The acquisition orchestrator (cascade + provenance)
//! - `session` - Assistant chat session seeded from a transcript
//!
//! # Example
//!
//! ```rust,no_run
//! use vidgist::acquire::Acquirer;
//! use vidgist::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let acquirer = Acquirer::new(settings)?;
//!
//!     let record = acquirer.acquire("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("{} ({:?})", record.title, record.provenance);
//!
//!     Ok(())
//! }
//! ```

pub mod acquire;
pub mod cli;
pub mod config;
pub mod error;
pub mod fabricate;
pub mod highlights;
pub mod openai;
pub mod platform;
pub mod session;
pub mod source;
pub mod transcribe;
pub mod video;

pub use error::{Result, VidgistError};
