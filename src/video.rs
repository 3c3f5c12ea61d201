//! Core data model: video records, transcript segments, highlights.

use crate::platform::Platform;
use serde::{Deserialize, Serialize};

/// Origin and quality classification of an acquired transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Transcript text comes verbatim from a platform caption payload.
    Official,
    /// Transcript was produced by speech transcription of downloaded audio.
    MachineTranscribed,
    /// Transcript and highlights were synthesized purely from metadata.
    Fabricated,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Official => write!(f, "official"),
            Provenance::MachineTranscribed => write!(f, "machine-transcribed"),
            Provenance::Fabricated => write!(f, "fabricated"),
        }
    }
}

/// A single transcript segment with timestamp information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Sequential ID, unique within the transcript.
    pub id: u32,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Derived display form of the start time (MM:SS, or HH:MM:SS past an hour).
    pub display_timestamp: String,
    /// Segment text.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new segment, deriving the display timestamp.
    pub fn new(id: u32, start_seconds: f64, text: String) -> Self {
        Self {
            id,
            start_seconds,
            display_timestamp: format_timestamp(start_seconds),
            text,
        }
    }
}

/// A labeled, colored, timestamped chapter within a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    /// Sequential ID, unique within the record.
    pub id: u32,
    /// Short chapter title.
    pub title: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds; always greater than `start_seconds`.
    pub end_seconds: f64,
    /// Display color token; opaque to the pipeline.
    pub color: String,
    /// Optional one-line description.
    pub description: Option<String>,
}

/// The canonical acquired result for a single video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub platform: Platform,
    /// Platform-scoped video identifier.
    pub external_id: String,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub duration_seconds: u32,
    pub thumbnail_url: String,
    /// Ordered transcript; start times are non-decreasing.
    pub transcript: Vec<TranscriptSegment>,
    /// Highlights ordered by start time; ranges may overlap.
    pub highlights: Vec<Highlight>,
    pub provenance: Provenance,
    /// True when the audio payload was cut at the size ceiling before
    /// transcription, so trailing content is unrepresented.
    pub audio_truncated: bool,
}

/// Concatenated segment text, space-joined.
pub fn full_text(transcript: &[TranscriptSegment]) -> String {
    transcript
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

impl VideoRecord {
    /// Render the transcript as `timestamp - text` lines.
    pub fn transcript_lines(&self) -> String {
        self.transcript
            .iter()
            .map(|s| format!("{} - {}", s.display_timestamp, s.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build numbered segments from raw `(start_seconds, text)` pairs.
///
/// Blank lines are dropped, negative start times clamped to zero, and the
/// sequence is sorted so start times are non-decreasing.
pub fn segments_from_lines(lines: impl IntoIterator<Item = (f64, String)>) -> Vec<TranscriptSegment> {
    let mut lines: Vec<(f64, String)> = lines
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(start, text)| (start.max(0.0), text.trim().to_string()))
        .collect();
    lines.sort_by(|a, b| a.0.total_cmp(&b.0));

    lines
        .into_iter()
        .enumerate()
        .map(|(i, (start, text))| TranscriptSegment::new(i as u32 + 1, start, text))
        .collect()
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(3665.0), "01:01:05");
        assert_eq!(format_timestamp(-3.0), "00:00");
    }

    #[test]
    fn test_segment_derives_display_timestamp() {
        let seg = TranscriptSegment::new(1, 83.4, "hello".to_string());
        assert_eq!(seg.display_timestamp, "01:23");
    }

    #[test]
    fn test_segments_from_lines_sorted_and_numbered() {
        let segments = segments_from_lines(vec![
            (10.0, "second".to_string()),
            (0.0, "first".to_string()),
            (5.0, "   ".to_string()),
            (-2.0, "clamped".to_string()),
        ]);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "clamped");
        assert_eq!(segments[0].start_seconds, 0.0);
        // IDs are sequential and start times non-decreasing
        for (i, pair) in segments.windows(2).enumerate() {
            assert_eq!(segments[i].id, i as u32 + 1);
            assert!(pair[0].start_seconds <= pair[1].start_seconds);
        }
    }

    #[test]
    fn test_transcript_lines_format() {
        let record = VideoRecord {
            platform: Platform::YouTube,
            external_id: "abc".to_string(),
            title: "t".to_string(),
            author: "a".to_string(),
            category: None,
            duration_seconds: 120,
            thumbnail_url: String::new(),
            transcript: vec![
                TranscriptSegment::new(1, 0.0, "Hello".to_string()),
                TranscriptSegment::new(2, 61.0, "world".to_string()),
            ],
            highlights: Vec::new(),
            provenance: Provenance::Official,
            audio_truncated: false,
        };

        assert_eq!(record.transcript_lines(), "00:00 - Hello\n01:01 - world");
        assert_eq!(full_text(&record.transcript), "Hello world");
    }
}
