//! Assistant session seeded from an acquired transcript.
//!
//! The session is an owned object with its lifecycle under caller control:
//! create it after an acquisition, drop or replace it to start over. There
//! is no module-level singleton. Exchanges are serialized by ownership:
//! `send` takes `&mut self`, so only one is ever in flight.

use crate::config::Settings;
use crate::openai::create_client;
use crate::video::{TranscriptSegment, VideoRecord};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use tracing::{info, warn};

/// Only the leading segments seed the briefing, bounding token cost.
pub const BRIEFING_SEGMENT_CAP: usize = 300;

/// Fixed reply when the chat capability fails; `send` never raises.
const APOLOGY: &str = "Sorry, I couldn't process that message. Please try again.";

/// Build the fixed system briefing from a transcript prefix.
///
/// `[timestamp] text` lines, newline-joined, capped at
/// [`BRIEFING_SEGMENT_CAP`] segments.
pub fn build_briefing(title: &str, transcript: &[TranscriptSegment]) -> String {
    let lines = transcript
        .iter()
        .take(BRIEFING_SEGMENT_CAP)
        .map(|s| format!("[{}] {}", s.display_timestamp, s.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an assistant answering questions about the video \"{}\". \
         Ground your answers in this transcript and cite timestamps when relevant. \
         If the transcript does not cover something, say so.\n\n\
         Transcript:\n{}",
        title, lines
    )
}

/// One live conversation about one acquired video.
///
/// Holds its own briefing copy derived from the record; it keeps no
/// reference back to the [`VideoRecord`].
pub struct AssistantSession {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    briefing: String,
    history: Vec<ChatCompletionRequestMessage>,
}

impl AssistantSession {
    /// Open a conversation seeded from an acquired record.
    pub fn new(record: &VideoRecord, settings: &Settings) -> Self {
        let briefing = build_briefing(&record.title, &record.transcript);
        info!(
            "Assistant session opened for {} ({} briefing segments)",
            record.external_id,
            record.transcript.len().min(BRIEFING_SEGMENT_CAP)
        );

        Self {
            client: create_client(),
            model: settings.models.chat.clone(),
            briefing,
            history: Vec::new(),
        }
    }

    /// Send a user turn and return the assistant reply.
    ///
    /// Failures come back as a fixed apology string; the history keeps
    /// only successful exchanges.
    pub async fn send(&mut self, message: &str) -> String {
        match self.exchange(message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat exchange failed: {}", e);
                APOLOGY.to_string()
            }
        }
    }

    async fn exchange(&mut self, message: &str) -> crate::Result<String> {
        let user_message: ChatCompletionRequestMessage =
            ChatCompletionRequestUserMessageArgs::default()
                .content(message)
                .build()
                .map_err(|e| crate::VidgistError::Generative(e.to_string()))?
                .into();

        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.briefing.clone())
                .build()
                .map_err(|e| crate::VidgistError::Generative(e.to_string()))?
                .into(),
        ];
        messages.extend(self.history.iter().cloned());
        messages.push(user_message.clone());

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.7)
            .build()
            .map_err(|e| crate::VidgistError::Generative(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| crate::VidgistError::Generative(e.to_string()))?;

        let reply = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| {
                crate::VidgistError::Generative("Empty response from model".to_string())
            })?
            .clone();

        // Append-only turn history
        self.history.push(user_message);
        self.history.push(
            ChatCompletionRequestAssistantMessageArgs::default()
                .content(reply.clone())
                .build()
                .map_err(|e| crate::VidgistError::Generative(e.to_string()))?
                .into(),
        );

        Ok(reply)
    }

    /// Number of turns exchanged so far.
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(n: usize) -> Vec<TranscriptSegment> {
        (0..n)
            .map(|i| TranscriptSegment::new(i as u32 + 1, i as f64 * 10.0, format!("segment {}", i)))
            .collect()
    }

    #[test]
    fn test_briefing_format() {
        let briefing = build_briefing("Demo", &segments(2));
        assert!(briefing.contains("\"Demo\""));
        assert!(briefing.contains("[00:00] segment 0"));
        assert!(briefing.contains("[00:10] segment 1"));
    }

    #[test]
    fn test_briefing_caps_segments() {
        let briefing = build_briefing("Long", &segments(500));
        assert!(briefing.contains("segment 299"));
        assert!(!briefing.contains("segment 300"));
    }

    #[test]
    fn test_briefing_empty_transcript() {
        let briefing = build_briefing("Empty", &[]);
        assert!(briefing.contains("Transcript:\n"));
    }

    #[test]
    fn test_new_session_has_no_turns() {
        use crate::config::Settings;
        use crate::platform::Platform;
        use crate::video::{Provenance, VideoRecord};

        let record = VideoRecord {
            platform: Platform::YouTube,
            external_id: "abc".to_string(),
            title: "Demo".to_string(),
            author: "a".to_string(),
            category: None,
            duration_seconds: 60,
            thumbnail_url: String::new(),
            transcript: segments(3),
            highlights: Vec::new(),
            provenance: Provenance::Official,
            audio_truncated: false,
        };

        let session = AssistantSession::new(&record, &Settings::default());
        assert_eq!(session.turn_count(), 0);
        assert!(session.briefing.contains("segment 2"));
    }
}
