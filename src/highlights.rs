//! Highlight synthesis from transcript text.
//!
//! Invoked whenever a real or machine-transcribed transcript exists. A
//! failed or malformed generative call yields an empty highlight list; a
//! record with a transcript and no highlights is still useful.

use crate::error::Result;
use crate::openai::{create_client, structured_call};
use crate::source::VideoMetadata;
use crate::video::Highlight;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Transcript text past this length does not influence highlight placement.
pub const MAX_TRANSCRIPT_CHARS: usize = 15_000;

/// Display color tokens offered to the model and used to backfill.
pub const HIGHLIGHT_COLORS: &[&str] = &["indigo", "emerald", "amber", "rose", "sky", "violet"];

const SYSTEM_PROMPT: &str = "You are a video editor who segments videos into a small number of \
    topical chapters. Chapters have short titles, one-line descriptions, and time ranges that \
    fall within the video duration. Respond only with JSON conforming to the given schema.";

/// Raw highlight shape returned by the structured-output call.
#[derive(Debug, Deserialize)]
pub(crate) struct RawHighlight {
    pub title: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// JSON schema fragment for an array of highlights.
pub(crate) fn highlight_array_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "additionalProperties": false,
            "required": ["title", "start_seconds", "end_seconds", "color", "description"],
            "properties": {
                "title": {"type": "string"},
                "start_seconds": {"type": "number"},
                "end_seconds": {"type": "number"},
                "color": {"type": "string", "enum": HIGHLIGHT_COLORS},
                "description": {"type": "string"}
            }
        }
    })
}

/// Clamp raw highlights into `[0, duration]`, drop empty ranges, order by
/// start time, and assign sequential IDs and fallback colors.
///
/// A zero duration means the length is unknown; only the lower bound is
/// enforced then.
pub(crate) fn clamp_highlights(raw: Vec<RawHighlight>, duration_seconds: u32) -> Vec<Highlight> {
    let duration = duration_seconds as f64;
    let mut kept: Vec<RawHighlight> = raw
        .into_iter()
        .map(|mut h| {
            h.start_seconds = h.start_seconds.max(0.0);
            h.end_seconds = h.end_seconds.max(0.0);
            if duration > 0.0 {
                h.start_seconds = h.start_seconds.min(duration);
                h.end_seconds = h.end_seconds.min(duration);
            }
            h
        })
        .filter(|h| h.end_seconds > h.start_seconds && !h.title.trim().is_empty())
        .collect();
    kept.sort_by(|a, b| a.start_seconds.total_cmp(&b.start_seconds));

    kept.into_iter()
        .enumerate()
        .map(|(i, h)| Highlight {
            id: i as u32 + 1,
            title: h.title.trim().to_string(),
            start_seconds: h.start_seconds,
            end_seconds: h.end_seconds,
            color: h
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| HIGHLIGHT_COLORS[i % HIGHLIGHT_COLORS.len()].to_string()),
            description: h.description.filter(|d| !d.trim().is_empty()),
        })
        .collect()
}

/// Generative highlight synthesizer.
pub struct HighlightSynthesizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl HighlightSynthesizer {
    pub fn new(model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
        }
    }

    /// Segment a transcript into highlights. Non-fatal: any failure
    /// returns an empty list.
    pub async fn synthesize(&self, meta: &VideoMetadata, transcript_text: &str) -> Vec<Highlight> {
        match self.try_synthesize(meta, transcript_text).await {
            Ok(highlights) => {
                debug!("Synthesized {} highlights", highlights.len());
                highlights
            }
            Err(e) => {
                warn!("Highlight synthesis failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_synthesize(
        &self,
        meta: &VideoMetadata,
        transcript_text: &str,
    ) -> Result<Vec<Highlight>> {
        // Lossy cost boundary: later segments do not steer placement
        let capped: String = transcript_text.chars().take(MAX_TRANSCRIPT_CHARS).collect();

        let user_prompt = format!(
            "Video: \"{}\" by {} ({} seconds{}).\n\
             Segment this transcript into 4-6 chapters:\n\n{}",
            meta.title,
            meta.author,
            meta.duration_seconds,
            meta.category
                .as_deref()
                .map(|c| format!(", category: {}", c))
                .unwrap_or_default(),
            capped
        );

        let schema = json!({
            "type": "object",
            "additionalProperties": false,
            "required": ["highlights"],
            "properties": {"highlights": highlight_array_schema()}
        });

        let payload = structured_call(
            &self.client,
            &self.model,
            SYSTEM_PROMPT,
            user_prompt,
            "video_highlights",
            schema,
        )
        .await?;

        let raw: Vec<RawHighlight> = serde_json::from_value(payload["highlights"].clone())
            .map_err(|e| crate::VidgistError::Generative(format!("Bad highlight shape: {}", e)))?;

        Ok(clamp_highlights(raw, meta.duration_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, start: f64, end: f64) -> RawHighlight {
        RawHighlight {
            title: title.to_string(),
            start_seconds: start,
            end_seconds: end,
            color: None,
            description: None,
        }
    }

    #[test]
    fn test_clamp_orders_and_numbers() {
        let highlights = clamp_highlights(
            vec![raw("Later", 300.0, 400.0), raw("Earlier", 0.0, 60.0)],
            600,
        );

        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].title, "Earlier");
        assert_eq!(highlights[0].id, 1);
        assert_eq!(highlights[1].id, 2);
    }

    #[test]
    fn test_clamp_enforces_bounds() {
        let highlights = clamp_highlights(
            vec![
                raw("Overruns", 500.0, 900.0),
                raw("Negative", -10.0, 30.0),
                raw("Past the end", 700.0, 800.0),
                raw("Empty range", 50.0, 50.0),
            ],
            600,
        );

        assert_eq!(highlights.len(), 2);
        for h in &highlights {
            assert!(h.start_seconds >= 0.0);
            assert!(h.end_seconds <= 600.0);
            assert!(h.end_seconds > h.start_seconds);
        }
    }

    #[test]
    fn test_clamp_with_unknown_duration() {
        // Zero duration skips the upper bound
        let highlights = clamp_highlights(vec![raw("Deep", 1000.0, 2000.0)], 0);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].end_seconds, 2000.0);
    }

    #[test]
    fn test_clamp_backfills_colors() {
        let highlights = clamp_highlights(vec![raw("A", 0.0, 10.0), raw("B", 10.0, 20.0)], 30);
        assert_eq!(highlights[0].color, HIGHLIGHT_COLORS[0]);
        assert_eq!(highlights[1].color, HIGHLIGHT_COLORS[1]);
    }
}
