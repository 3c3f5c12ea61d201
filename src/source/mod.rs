//! Per-platform video source abstraction.
//!
//! Each supported platform implements one capability set (metadata,
//! captions, audio); the orchestrator selects an implementation by
//! platform tag. Platform quirks such as forged browser headers or
//! multi-call caption discovery stay behind this trait.

mod bilibili;
mod youtube;

pub use bilibili::BilibiliSource;
pub use youtube::YoutubeSource;

use crate::error::{Result, VidgistError};
use crate::platform::Platform;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Browser identity presented to platform endpoints that reject
/// unrecognized clients. A quirk of unauthenticated API use.
pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36";

/// Duration substituted when even the reduced metadata route fails.
const OFFLINE_FALLBACK_DURATION_SECS: u32 = 600;

/// Video metadata resolved from a platform endpoint.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub platform: Platform,
    pub external_id: String,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub duration_seconds: u32,
    pub thumbnail_url: String,
    pub description: String,
}

/// One line of an official caption track.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLine {
    pub start_seconds: f64,
    pub text: String,
}

/// A downloaded audio payload ready for transcription.
#[derive(Debug)]
pub struct AudioPayload {
    pub bytes: Vec<u8>,
    /// File name hint carrying the container extension.
    pub file_name: String,
}

/// Capability set for one platform.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// The platform this source serves.
    fn platform(&self) -> Platform;

    /// Resolve title, author, duration and related metadata.
    ///
    /// Single attempt, no retry. A domain-level rejection inside the
    /// payload maps to [`VidgistError::UpstreamRejected`].
    async fn fetch_metadata(&self, id: &str) -> Result<VideoMetadata>;

    /// Retrieve the official caption track, if one exists.
    ///
    /// `Ok(None)` means the video exists but carries no caption asset;
    /// this is the common cascade signal, not an error.
    async fn fetch_captions(&self, id: &str) -> Result<Option<Vec<CaptionLine>>>;

    /// Obtain a direct audio stream URL and download its payload.
    async fn fetch_audio(&self, id: &str) -> Result<AudioPayload>;
}

/// Select the source implementation for a platform.
pub fn source_for(
    platform: Platform,
    http: reqwest::Client,
    caption_language: &str,
) -> Box<dyn VideoSource> {
    match platform {
        Platform::YouTube => Box::new(YoutubeSource::new(http, caption_language)),
        Platform::Bilibili => Box::new(BilibiliSource::new(http)),
    }
}

/// Canonical watch-page URL for a video, used by the indirect oEmbed route.
pub fn watch_url(platform: Platform, id: &str) -> String {
    match platform {
        Platform::YouTube => format!("https://www.youtube.com/watch?v={}", id),
        Platform::Bilibili => format!("https://www.bilibili.com/video/{}", id),
    }
}

/// Reduced-path metadata fetch via the indirect oEmbed route (noembed).
///
/// Used when the primary platform endpoints are unreachable. Returns only
/// basic fields; duration falls back to the offline default since oEmbed
/// does not carry it.
pub async fn fetch_basic_metadata(
    http: &reqwest::Client,
    platform: Platform,
    id: &str,
) -> Result<VideoMetadata> {
    let endpoint = Url::parse_with_params(
        "https://noembed.com/embed",
        &[("url", watch_url(platform, id))],
    )
    .map_err(|e| VidgistError::Transport(format!("Bad oEmbed URL: {}", e)))?;

    debug!("Fetching reduced metadata via {}", endpoint);

    let payload: serde_json::Value = http.get(endpoint).send().await?.json().await?;

    let title = payload["title"]
        .as_str()
        .ok_or_else(|| VidgistError::Transport("oEmbed payload missing title".to_string()))?
        .to_string();

    Ok(VideoMetadata {
        platform,
        external_id: id.to_string(),
        title,
        author: payload["author_name"].as_str().unwrap_or("Unknown").to_string(),
        category: None,
        duration_seconds: OFFLINE_FALLBACK_DURATION_SECS,
        thumbnail_url: payload["thumbnail_url"].as_str().unwrap_or("").to_string(),
        description: String::new(),
    })
}

/// Fixed placeholder metadata for when every metadata route has failed.
/// The user always receives some record.
pub fn placeholder_metadata(platform: Platform, id: &str) -> VideoMetadata {
    VideoMetadata {
        platform,
        external_id: id.to_string(),
        title: "Video (Offline Mode)".to_string(),
        author: "Unknown".to_string(),
        category: None,
        duration_seconds: OFFLINE_FALLBACK_DURATION_SECS,
        thumbnail_url: String::new(),
        description: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url(Platform::YouTube, "dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            watch_url(Platform::Bilibili, "BV1GJ411x7h7"),
            "https://www.bilibili.com/video/BV1GJ411x7h7"
        );
    }

    #[test]
    fn test_placeholder_metadata_defaults() {
        let meta = placeholder_metadata(Platform::YouTube, "abc");
        assert_eq!(meta.title, "Video (Offline Mode)");
        assert_eq!(meta.author, "Unknown");
        assert_eq!(meta.duration_seconds, 600);
        assert_eq!(meta.external_id, "abc");
    }
}
