//! Bilibili source implementation.
//!
//! The view API resolves metadata and the internal `cid` needed by the
//! other endpoints. Caption discovery takes two sequential calls: the view
//! payload names a subtitle asset URL, a second request fetches it. The
//! playurl endpoint hands out time-limited audio URLs but only to callers
//! that look like a browser, so requests carry a forged Referer and
//! User-Agent.

use super::{AudioPayload, CaptionLine, VideoMetadata, VideoSource, BROWSER_USER_AGENT};
use crate::error::{Result, VidgistError};
use crate::platform::Platform;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const VIEW_API: &str = "https://api.bilibili.com/x/web-interface/view";
const PLAYURL_API: &str = "https://api.bilibili.com/x/player/playurl";
const REFERER: &str = "https://www.bilibili.com";

/// Bilibili video source.
pub struct BilibiliSource {
    http: reqwest::Client,
}

/// Subtitle asset body shape.
#[derive(Debug, Deserialize)]
struct SubtitleBody {
    body: Vec<SubtitleLine>,
}

#[derive(Debug, Deserialize)]
struct SubtitleLine {
    from: f64,
    content: String,
}

impl BilibiliSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Issue a GET with the forged browser identity headers.
    async fn get_json(&self, url: &str) -> Result<Value> {
        let payload = self
            .http
            .get(url)
            .header(reqwest::header::REFERER, REFERER)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .json()
            .await?;
        Ok(payload)
    }

    /// Call the view API and validate its domain-level success code.
    async fn view(&self, id: &str) -> Result<Value> {
        let payload = self.get_json(&format!("{}?bvid={}", VIEW_API, id)).await?;

        let code = payload["code"].as_i64().unwrap_or(-1);
        if code != 0 {
            let message = payload["message"].as_str().unwrap_or("unknown error");
            return Err(VidgistError::UpstreamRejected(format!(
                "Bilibili video {}: {} (code {})",
                id, message, code
            )));
        }

        Ok(payload["data"].clone())
    }
}

#[async_trait]
impl VideoSource for BilibiliSource {
    fn platform(&self) -> Platform {
        Platform::Bilibili
    }

    async fn fetch_metadata(&self, id: &str) -> Result<VideoMetadata> {
        let data = self.view(id).await?;

        Ok(VideoMetadata {
            platform: Platform::Bilibili,
            external_id: id.to_string(),
            title: data["title"].as_str().unwrap_or("Untitled").to_string(),
            author: data["owner"]["name"].as_str().unwrap_or("Unknown").to_string(),
            category: data["tname"].as_str().map(|s| s.to_string()),
            duration_seconds: data["duration"].as_u64().unwrap_or(0) as u32,
            thumbnail_url: data["pic"].as_str().unwrap_or("").to_string(),
            description: data["desc"].as_str().unwrap_or("").to_string(),
        })
    }

    async fn fetch_captions(&self, id: &str) -> Result<Option<Vec<CaptionLine>>> {
        // First call discovers the subtitle asset URL; the second fetches
        // its body. Videos commonly have none.
        let data = self.view(id).await?;

        let Some(asset_url) = data["subtitle"]["list"]
            .as_array()
            .and_then(|list| list.first())
            .and_then(|entry| entry["subtitle_url"].as_str())
            .filter(|u| !u.is_empty())
            .map(|u| u.to_string())
        else {
            debug!("No subtitle asset for Bilibili video {}", id);
            return Ok(None);
        };

        // Asset URLs are often protocol-relative
        let asset_url = if asset_url.starts_with("//") {
            format!("https:{}", asset_url)
        } else {
            asset_url
        };

        let body: SubtitleBody = serde_json::from_value(self.get_json(&asset_url).await?)?;

        let lines: Vec<CaptionLine> = body
            .body
            .into_iter()
            .filter(|line| !line.content.trim().is_empty())
            .map(|line| CaptionLine {
                start_seconds: line.from,
                text: line.content.trim().to_string(),
            })
            .collect();

        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines))
        }
    }

    async fn fetch_audio(&self, id: &str) -> Result<AudioPayload> {
        let data = self.view(id).await?;
        let cid = data["cid"].as_u64().ok_or_else(|| {
            VidgistError::Transport("view payload carries no cid".to_string())
        })?;

        // fnval=16 selects DASH, which separates the audio track
        let payload = self
            .get_json(&format!(
                "{}?bvid={}&cid={}&fnval=16",
                PLAYURL_API, id, cid
            ))
            .await?;

        if payload["code"].as_i64().unwrap_or(-1) != 0 {
            return Err(VidgistError::Transport(format!(
                "playurl rejected: {}",
                payload["message"].as_str().unwrap_or("unknown error")
            )));
        }

        let stream_url = payload["data"]["dash"]["audio"]
            .as_array()
            .and_then(|tracks| tracks.first())
            .and_then(|track| track["baseUrl"].as_str())
            .ok_or_else(|| {
                VidgistError::Transport("no direct audio stream available".to_string())
            })?;

        debug!("Downloading Bilibili audio for {}", id);
        let bytes = self
            .http
            .get(stream_url)
            .header(reqwest::header::REFERER, REFERER)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .bytes()
            .await?;

        Ok(AudioPayload {
            bytes: bytes.to_vec(),
            file_name: format!("{}.m4a", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_body_parsing() {
        let raw = serde_json::json!({
            "font_size": 0.4,
            "body": [
                {"from": 0.5, "to": 2.0, "content": "你好"},
                {"from": 2.0, "to": 4.0, "content": "  "},
                {"from": 4.0, "to": 6.0, "content": "世界"},
            ]
        });

        let body: SubtitleBody = serde_json::from_value(raw).unwrap();
        let lines: Vec<CaptionLine> = body
            .body
            .into_iter()
            .filter(|l| !l.content.trim().is_empty())
            .map(|l| CaptionLine {
                start_seconds: l.from,
                text: l.content.trim().to_string(),
            })
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "你好");
        assert_eq!(lines[1].start_seconds, 4.0);
    }
}
