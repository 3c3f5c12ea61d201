//! Configuration settings for vidgist.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub models: ModelSettings,
    pub acquisition: AcquisitionSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Model selection for the three generative capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Chat model for the assistant session.
    pub chat: String,
    /// Speech transcription model for the audio fallback tier.
    pub transcription: String,
    /// Structured-output model for fabrication and highlight synthesis.
    pub content: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            chat: "gpt-4o-mini".to_string(),
            transcription: "whisper-1".to_string(),
            content: "gpt-4o-mini".to_string(),
        }
    }
}

/// Acquisition pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionSettings {
    /// Preferred caption language (ISO 639-1).
    pub caption_language: String,
    /// Connect timeout for platform requests, in seconds. There is no
    /// global request timeout: audio download may legitimately be slow.
    pub connect_timeout_secs: u64,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            caption_language: "en".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    ///
    /// Missing file means defaults; a present but malformed file is an error.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p.clone(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }
}

/// Default configuration file location (`~/.vidgist/config.toml`).
fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vidgist")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.models.transcription, "whisper-1");
        assert_eq!(settings.acquisition.caption_language, "en");
        assert_eq!(settings.acquisition.connect_timeout_secs, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [models]
            chat = "gpt-4o"
            "#,
        )
        .unwrap();
        assert_eq!(settings.models.chat, "gpt-4o");
        assert_eq!(settings.models.transcription, "whisper-1");
        assert_eq!(settings.general.log_level, "info");
    }
}
