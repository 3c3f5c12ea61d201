//! Platform identification.
//!
//! Classifies a raw URL string (or a bare platform-native ID) into a known
//! platform plus its video identifier. Pure and deterministic; no I/O.

use crate::error::{Result, VidgistError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A supported video platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    Bilibili,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::YouTube => write!(f, "youtube"),
            Platform::Bilibili => write!(f, "bilibili"),
        }
    }
}

fn youtube_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Matches various YouTube URL formats and bare 11-char video IDs
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    })
}

fn bilibili_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Matches bilibili.com/video/BVxxxxxxxxxx URLs and bare BV IDs
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                bilibili\.com/video/
                (BV[a-zA-Z0-9]{10})
            )
            |
            ^(BV[a-zA-Z0-9]{10})$
        ",
        )
        .expect("Invalid regex")
    })
}

/// Classify an input string into a platform and a platform-native video ID.
///
/// Accepts both full URLs and bare IDs. Bilibili is checked first so a
/// bare `BV...` ID is never misread as an 11-character YouTube ID.
pub fn identify(input: &str) -> Result<(Platform, String)> {
    let input = input.trim();

    if let Some(caps) = bilibili_regex().captures(input) {
        if let Some(id) = caps.get(1).or_else(|| caps.get(2)) {
            return Ok((Platform::Bilibili, id.as_str().to_string()));
        }
    }

    if let Some(caps) = youtube_regex().captures(input) {
        if let Some(id) = caps.get(1).or_else(|| caps.get(2)) {
            return Ok((Platform::YouTube, id.as_str().to_string()));
        }
    }

    Err(VidgistError::InvalidReference(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_youtube_urls() {
        for input in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ] {
            let (platform, id) = identify(input).unwrap();
            assert_eq!(platform, Platform::YouTube, "input: {}", input);
            assert_eq!(id, "dQw4w9WgXcQ");
        }
    }

    #[test]
    fn test_identify_bilibili_urls() {
        for input in [
            "https://www.bilibili.com/video/BV1GJ411x7h7",
            "bilibili.com/video/BV1GJ411x7h7",
            "BV1GJ411x7h7",
        ] {
            let (platform, id) = identify(input).unwrap();
            assert_eq!(platform, Platform::Bilibili, "input: {}", input);
            assert_eq!(id, "BV1GJ411x7h7");
        }
    }

    #[test]
    fn test_identify_is_deterministic() {
        let a = identify("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let b = identify("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identify_rejects_unknown() {
        for input in ["not-a-video", "", "https://example.com/watch?v=abc"] {
            assert!(matches!(
                identify(input),
                Err(VidgistError::InvalidReference(_))
            ));
        }
    }

    #[test]
    fn test_bare_bv_id_is_not_youtube() {
        // A BV ID is 12 chars so it can't collide with the 11-char rule,
        // but the bilibili-first ordering keeps this unambiguous anyway.
        let (platform, _) = identify("BV1GJ411x7h7").unwrap();
        assert_eq!(platform, Platform::Bilibili);
    }
}
