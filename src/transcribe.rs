//! Audio transcription fallback tier.
//!
//! Downloads are bounded: payloads past a hard ceiling are cut to the
//! leading bytes rather than aborted, trading transcript completeness for
//! request feasibility. The cut is surfaced on the record so consumers
//! know trailing content is unrepresented.

use crate::error::{Result, VidgistError};
use crate::openai::create_client;
use crate::source::AudioPayload;
use crate::video::{segments_from_lines, TranscriptSegment};
use async_openai::types::{AudioResponseFormat, CreateTranscriptionRequestArgs};
use tracing::{debug, info};

/// Hard ceiling on audio payload size submitted for transcription (20 MiB).
pub const AUDIO_BYTE_CEILING: usize = 20 * 1024 * 1024;

/// Cut an audio payload down to the ceiling if it exceeds it.
///
/// Returns the (possibly shortened) bytes and whether a cut happened.
pub fn truncate_audio(mut bytes: Vec<u8>) -> (Vec<u8>, bool) {
    if bytes.len() > AUDIO_BYTE_CEILING {
        bytes.truncate(AUDIO_BYTE_CEILING);
        (bytes, true)
    } else {
        (bytes, false)
    }
}

/// Result of machine transcription.
#[derive(Debug)]
pub struct MachineTranscript {
    pub segments: Vec<TranscriptSegment>,
    /// True when the audio payload was cut before submission.
    pub truncated: bool,
}

/// Speech transcriber for the audio fallback tier.
pub struct AudioTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    language: String,
}

impl AudioTranscriber {
    pub fn new(model: &str, language: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            language: language.to_string(),
        }
    }

    /// Transcribe a downloaded audio payload into timestamped segments.
    pub async fn transcribe(&self, audio: AudioPayload) -> Result<MachineTranscript> {
        let (bytes, truncated) = truncate_audio(audio.bytes);
        if truncated {
            info!(
                "Audio payload exceeded {} bytes; transcribing leading portion only",
                AUDIO_BYTE_CEILING
            );
        }

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio.file_name,
                bytes,
            ))
            .model(&self.model)
            .language(&self.language)
            .response_format(AudioResponseFormat::VerboseJson)
            .build()
            .map_err(|e| VidgistError::Generative(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe_verbose_json(request)
            .await
            .map_err(|e| VidgistError::Generative(format!("{} API error: {}", self.model, e)))?;

        // Verbose JSON segments carry start times; fall back to one
        // zero-anchored segment if the model returned none.
        let lines: Vec<(f64, String)> = match response.segments {
            Some(segs) => segs
                .iter()
                .map(|s| (s.start as f64, s.text.trim().to_string()))
                .collect(),
            None => vec![(0.0, response.text.trim().to_string())],
        };

        let segments = segments_from_lines(lines);
        debug!("Transcribed {} segments from audio", segments.len());

        Ok(MachineTranscript {
            segments,
            truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_under_ceiling() {
        let (bytes, truncated) = truncate_audio(vec![0u8; 1024]);
        assert_eq!(bytes.len(), 1024);
        assert!(!truncated);
    }

    #[test]
    fn test_truncate_at_ceiling() {
        let (bytes, truncated) = truncate_audio(vec![0u8; AUDIO_BYTE_CEILING]);
        assert_eq!(bytes.len(), AUDIO_BYTE_CEILING);
        assert!(!truncated);
    }

    #[test]
    fn test_truncate_over_ceiling() {
        // 30 MB payload cuts to exactly 20 MiB
        let (bytes, truncated) = truncate_audio(vec![0u8; 30 * 1000 * 1000]);
        assert_eq!(bytes.len(), AUDIO_BYTE_CEILING);
        assert!(truncated);
    }
}
