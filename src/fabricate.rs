//! Content fabrication fallback tier.
//!
//! When neither captions nor machine transcription are available, a single
//! structured-output call synthesizes a plausible transcript and a set of
//! highlights from metadata alone. The result is honest about being
//! invented: it only ever surfaces under `Provenance::Fabricated`.

use crate::error::Result;
use crate::highlights::{clamp_highlights, highlight_array_schema, RawHighlight};
use crate::openai::{create_client, structured_call};
use crate::source::VideoMetadata;
use crate::video::{segments_from_lines, Highlight, TranscriptSegment};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Description text passed to the generative call is cut here.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

const SYSTEM_PROMPT: &str = "You are reconstructing the likely content of a video from its \
    metadata alone. Write a plausible transcript with a segment every 45-90 seconds covering \
    the full duration, plus 4-6 topical highlights. Respond only with JSON conforming to the \
    given schema.";

#[derive(Debug, Deserialize)]
struct RawSegment {
    start_seconds: f64,
    text: String,
}

/// Transcript and highlights produced by one fabrication call.
///
/// Both sequences are populated together or empty together; an empty pair
/// is the legitimate "nothing available" state, not an error.
#[derive(Debug, Default)]
pub struct FabricatedContent {
    pub transcript: Vec<TranscriptSegment>,
    pub highlights: Vec<Highlight>,
}

/// Metadata-only content fabricator.
pub struct Fabricator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl Fabricator {
    pub fn new(model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
        }
    }

    /// Synthesize transcript and highlights from metadata.
    ///
    /// Never raises: any call failure or malformed output collapses to an
    /// explicitly empty pair.
    pub async fn fabricate(&self, meta: &VideoMetadata) -> FabricatedContent {
        match self.try_fabricate(meta).await {
            Ok(content) => {
                debug!(
                    "Fabricated {} segments and {} highlights",
                    content.transcript.len(),
                    content.highlights.len()
                );
                content
            }
            Err(e) => {
                warn!("Fabrication failed: {}", e);
                FabricatedContent::default()
            }
        }
    }

    async fn try_fabricate(&self, meta: &VideoMetadata) -> Result<FabricatedContent> {
        let description: String = meta.description.chars().take(MAX_DESCRIPTION_CHARS).collect();

        let user_prompt = format!(
            "Title: {}\nAuthor: {}\nDuration: {} seconds{}{}",
            meta.title,
            meta.author,
            meta.duration_seconds,
            meta.category
                .as_deref()
                .map(|c| format!("\nCategory: {}", c))
                .unwrap_or_default(),
            if description.trim().is_empty() {
                String::new()
            } else {
                format!("\nDescription: {}", description)
            },
        );

        let schema = json!({
            "type": "object",
            "additionalProperties": false,
            "required": ["transcript", "highlights"],
            "properties": {
                "transcript": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["start_seconds", "text"],
                        "properties": {
                            "start_seconds": {"type": "number"},
                            "text": {"type": "string"}
                        }
                    }
                },
                "highlights": highlight_array_schema()
            }
        });

        let payload = structured_call(
            &self.client,
            &self.model,
            SYSTEM_PROMPT,
            user_prompt,
            "fabricated_video_content",
            schema,
        )
        .await?;

        Ok(shape_content(payload, meta.duration_seconds))
    }
}

/// Shape a structured-output payload into [`FabricatedContent`].
///
/// Malformed shapes and partial results both collapse to the empty pair:
/// the two sequences are only ever surfaced together.
fn shape_content(payload: serde_json::Value, duration_seconds: u32) -> FabricatedContent {
    let segments: Vec<RawSegment> = match serde_json::from_value(payload["transcript"].clone()) {
        Ok(segments) => segments,
        Err(e) => {
            warn!("Bad transcript shape ({}); discarding fabrication", e);
            return FabricatedContent::default();
        }
    };
    let highlights: Vec<RawHighlight> = match serde_json::from_value(payload["highlights"].clone())
    {
        Ok(highlights) => highlights,
        Err(e) => {
            warn!("Bad highlight shape ({}); discarding fabrication", e);
            return FabricatedContent::default();
        }
    };

    let content = FabricatedContent {
        transcript: segments_from_lines(segments.into_iter().map(|s| (s.start_seconds, s.text))),
        highlights: clamp_highlights(highlights, duration_seconds),
    };

    if content.transcript.is_empty() || content.highlights.is_empty() {
        warn!("Fabrication produced a partial result; discarding both sequences");
        return FabricatedContent::default();
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_pair() {
        let content = FabricatedContent::default();
        assert!(content.transcript.is_empty());
        assert!(content.highlights.is_empty());
    }

    #[test]
    fn test_raw_segment_parsing() {
        let raw: Vec<RawSegment> = serde_json::from_value(json!([
            {"start_seconds": 0, "text": "Welcome"},
            {"start_seconds": 60, "text": "Main part"},
        ]))
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].start_seconds, 60.0);
    }

    #[test]
    fn test_malformed_payload_yields_empty_pair() {
        let content = shape_content(
            json!({"transcript": "not an array", "highlights": []}),
            600,
        );
        assert!(content.transcript.is_empty());
        assert!(content.highlights.is_empty());
    }

    #[test]
    fn test_transcript_only_result_is_discarded_whole() {
        let content = shape_content(
            json!({
                "transcript": [{"start_seconds": 0, "text": "Welcome"}],
                "highlights": []
            }),
            600,
        );
        assert!(content.transcript.is_empty());
        assert!(content.highlights.is_empty());
    }

    #[test]
    fn test_complete_result_is_kept() {
        let content = shape_content(
            json!({
                "transcript": [
                    {"start_seconds": 0, "text": "Welcome"},
                    {"start_seconds": 60, "text": "Main part"}
                ],
                "highlights": [
                    {"title": "Intro", "start_seconds": 0.0, "end_seconds": 45.0}
                ]
            }),
            600,
        );
        assert_eq!(content.transcript.len(), 2);
        assert_eq!(content.highlights.len(), 1);
        assert_eq!(content.highlights[0].title, "Intro");
    }
}
