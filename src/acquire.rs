//! Acquisition orchestrator.
//!
//! Composes the tiers into the full cascade and tags the result with its
//! provenance. Terminal failures are exactly two: the URL matched no
//! platform, or the platform explicitly rejected the identifier. Every
//! other failure narrows the achievable tier instead of failing the
//! request.
//!
//! Abandoning a request is dropping its future; in-flight platform and
//! generative calls are cancelled with it and no partial record escapes.

use crate::config::Settings;
use crate::error::Result;
use crate::fabricate::Fabricator;
use crate::highlights::HighlightSynthesizer;
use crate::platform::{self, Platform};
use crate::source::{
    fetch_basic_metadata, placeholder_metadata, source_for, VideoMetadata, VideoSource,
};
use crate::transcribe::AudioTranscriber;
use crate::video::{
    full_text, segments_from_lines, Highlight, Provenance, TranscriptSegment, VideoRecord,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Elapsed seconds before the slow-stage hint is surfaced.
const SLOW_HINT_SECS: u64 = 10;

/// The transcript tier actually reached, tagged with its payload.
///
/// The orchestrator pattern-matches on this instead of tracking boolean
/// flags, so the provenance badge can never drift from the data.
#[derive(Debug)]
pub enum AcquiredTranscript {
    /// Verbatim platform captions.
    Official(Vec<TranscriptSegment>),
    /// Speech transcription of downloaded audio.
    MachineTranscribed {
        segments: Vec<TranscriptSegment>,
        truncated: bool,
    },
    /// Metadata-only synthesis; highlights come from the same call.
    Fabricated {
        segments: Vec<TranscriptSegment>,
        highlights: Vec<Highlight>,
    },
}

impl AcquiredTranscript {
    /// The provenance tier this payload represents.
    pub fn provenance(&self) -> Provenance {
        match self {
            AcquiredTranscript::Official(_) => Provenance::Official,
            AcquiredTranscript::MachineTranscribed { .. } => Provenance::MachineTranscribed,
            AcquiredTranscript::Fabricated { .. } => Provenance::Fabricated,
        }
    }
}

/// The main acquisition orchestrator.
pub struct Acquirer {
    http: reqwest::Client,
    transcriber: AudioTranscriber,
    fabricator: Fabricator,
    highlighter: HighlightSynthesizer,
    caption_language: String,
}

impl Acquirer {
    /// Create an orchestrator from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        // Connect timeout only: audio download and transcription may
        // legitimately take tens of seconds, so no global deadline.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(
                settings.acquisition.connect_timeout_secs,
            ))
            .build()?;

        Ok(Self {
            http,
            transcriber: AudioTranscriber::new(
                &settings.models.transcription,
                &settings.acquisition.caption_language,
            ),
            fabricator: Fabricator::new(&settings.models.content),
            highlighter: HighlightSynthesizer::new(&settings.models.content),
            caption_language: settings.acquisition.caption_language,
        })
    }

    /// Acquire a [`VideoRecord`] for a URL or bare video ID.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn acquire(&self, input: &str) -> Result<VideoRecord> {
        let (platform, id) = platform::identify(input)?;
        info!("Identified {} video {}", platform, id);

        let source = source_for(platform, self.http.clone(), &self.caption_language);

        // Metadata and captions have no ordering dependency
        eprintln!("  Resolving metadata...");
        let (meta, captions) =
            tokio::join!(source.fetch_metadata(&id), source.fetch_captions(&id));

        let meta = match meta {
            Ok(meta) => meta,
            Err(e) if e.is_transport() => {
                // The platform API path is unreachable: reduced path with
                // indirect metadata, straight to fabrication.
                warn!("Primary metadata route unreachable ({}); degrading", e);
                return self.acquire_reduced(platform, &id).await;
            }
            Err(e) => return Err(e),
        };
        eprintln!("  Title: {}", meta.title);

        let tier = match captions {
            Ok(Some(lines)) => {
                info!("Using official captions ({} lines)", lines.len());
                AcquiredTranscript::Official(segments_from_lines(
                    lines.into_iter().map(|l| (l.start_seconds, l.text)),
                ))
            }
            Ok(None) => {
                info!("No caption track; trying audio transcription");
                self.machine_or_fabricated(source.as_ref(), &meta).await
            }
            Err(e) => {
                warn!("Caption retrieval failed ({}); trying audio transcription", e);
                self.machine_or_fabricated(source.as_ref(), &meta).await
            }
        };

        // Real transcripts still need highlights; fabricated ones carry
        // their own from the same generative call.
        let highlights = match &tier {
            AcquiredTranscript::Fabricated { .. } => Vec::new(),
            AcquiredTranscript::Official(segments)
            | AcquiredTranscript::MachineTranscribed { segments, .. } => {
                eprintln!("  Synthesizing highlights...");
                self.highlighter
                    .synthesize(&meta, &full_text(segments))
                    .await
            }
        };

        Ok(assemble_record(meta, tier, highlights))
    }

    /// Audio transcription tier, downgrading to fabrication on any failure.
    async fn machine_or_fabricated(
        &self,
        source: &dyn VideoSource,
        meta: &VideoMetadata,
    ) -> AcquiredTranscript {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message("Downloading and transcribing audio...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        // Surface a hint instead of blocking silently on a slow stage
        let hint = tokio::spawn({
            let spinner = spinner.clone();
            async move {
                tokio::time::sleep(Duration::from_secs(SLOW_HINT_SECS)).await;
                spinner.set_message("Still transcribing; this may take a while...");
            }
        });

        let outcome = async {
            let audio = source.fetch_audio(&meta.external_id).await?;
            self.transcriber.transcribe(audio).await
        }
        .await;
        hint.abort();
        spinner.finish_and_clear();

        match outcome {
            Ok(machine) if !machine.segments.is_empty() => AcquiredTranscript::MachineTranscribed {
                segments: machine.segments,
                truncated: machine.truncated,
            },
            Ok(_) => {
                warn!("Audio transcription returned no segments; fabricating");
                self.fabricated_tier(meta).await
            }
            Err(e) => {
                warn!("Audio transcription failed ({}); fabricating", e);
                self.fabricated_tier(meta).await
            }
        }
    }

    async fn fabricated_tier(&self, meta: &VideoMetadata) -> AcquiredTranscript {
        eprintln!("  Fabricating content from metadata...");
        let content = self.fabricator.fabricate(meta).await;
        AcquiredTranscript::Fabricated {
            segments: content.transcript,
            highlights: content.highlights,
        }
    }

    /// Client-local reduced path: indirect metadata (or placeholders),
    /// then fabrication. The caption and audio tiers need the primary
    /// route and are skipped entirely.
    async fn acquire_reduced(&self, platform: Platform, id: &str) -> Result<VideoRecord> {
        eprintln!("  Primary route unreachable; running in reduced mode...");
        let meta = match fetch_basic_metadata(&self.http, platform, id).await {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Reduced metadata route failed too ({}); using placeholders", e);
                placeholder_metadata(platform, id)
            }
        };

        let tier = self.fabricated_tier(&meta).await;
        Ok(assemble_record(meta, tier, Vec::new()))
    }
}

/// Assemble the final record from metadata and the reached tier.
fn assemble_record(
    meta: VideoMetadata,
    tier: AcquiredTranscript,
    highlights: Vec<Highlight>,
) -> VideoRecord {
    let provenance = tier.provenance();
    let (transcript, highlights, audio_truncated) = match tier {
        AcquiredTranscript::Official(segments) => (segments, highlights, false),
        AcquiredTranscript::MachineTranscribed {
            segments,
            truncated,
        } => (segments, highlights, truncated),
        AcquiredTranscript::Fabricated {
            segments,
            highlights,
        } => (segments, highlights, false),
    };

    VideoRecord {
        platform: meta.platform,
        external_id: meta.external_id,
        title: meta.title,
        author: meta.author,
        category: meta.category,
        duration_seconds: meta.duration_seconds,
        thumbnail_url: meta.thumbnail_url,
        transcript,
        highlights,
        provenance,
        audio_truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> VideoMetadata {
        VideoMetadata {
            platform: Platform::YouTube,
            external_id: "XYZ123".to_string(),
            title: "Intro to Testing".to_string(),
            author: "Tester".to_string(),
            category: None,
            duration_seconds: 600,
            thumbnail_url: String::new(),
            description: String::new(),
        }
    }

    fn segs() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(1, 0.0, "Hello".to_string()),
            TranscriptSegment::new(2, 5.0, "world".to_string()),
        ]
    }

    #[test]
    fn test_tier_provenance_mapping() {
        assert_eq!(
            AcquiredTranscript::Official(segs()).provenance(),
            Provenance::Official
        );
        assert_eq!(
            AcquiredTranscript::MachineTranscribed {
                segments: segs(),
                truncated: false
            }
            .provenance(),
            Provenance::MachineTranscribed
        );
        assert_eq!(
            AcquiredTranscript::Fabricated {
                segments: Vec::new(),
                highlights: Vec::new()
            }
            .provenance(),
            Provenance::Fabricated
        );
    }

    #[test]
    fn test_assemble_official_record() {
        let record = assemble_record(meta(), AcquiredTranscript::Official(segs()), Vec::new());
        assert_eq!(record.provenance, Provenance::Official);
        assert_eq!(record.transcript.len(), 2);
        assert_eq!(record.transcript[0].text, "Hello");
        assert!(!record.audio_truncated);
    }

    #[test]
    fn test_assemble_machine_record_carries_truncation() {
        let record = assemble_record(
            meta(),
            AcquiredTranscript::MachineTranscribed {
                segments: segs(),
                truncated: true,
            },
            Vec::new(),
        );
        assert_eq!(record.provenance, Provenance::MachineTranscribed);
        assert!(record.audio_truncated);
    }

    #[test]
    fn test_assemble_fabricated_empty_pair() {
        // A failed fabrication call still yields a displayable record
        let record = assemble_record(
            meta(),
            AcquiredTranscript::Fabricated {
                segments: Vec::new(),
                highlights: Vec::new(),
            },
            Vec::new(),
        );
        assert_eq!(record.provenance, Provenance::Fabricated);
        assert!(record.transcript.is_empty());
        assert!(record.highlights.is_empty());
    }

    #[test]
    fn test_transcript_order_is_non_decreasing() {
        let record = assemble_record(meta(), AcquiredTranscript::Official(segs()), Vec::new());
        for pair in record.transcript.windows(2) {
            assert!(pair[0].start_seconds <= pair[1].start_seconds);
        }
    }
}
