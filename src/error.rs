//! Error types for vidgist.

use thiserror::Error;

/// Library-level error type for vidgist operations.
///
/// Absence of captions or of a transcript is not an error; those are
/// cascade signals expressed as `Option`/enum shapes at the call sites.
#[derive(Error, Debug)]
pub enum VidgistError {
    /// The input string matched no known platform pattern. Terminal.
    #[error("Unrecognized video reference: {0}")]
    InvalidReference(String),

    /// The platform itself reported the video as nonexistent, private or
    /// otherwise unavailable. Terminal.
    #[error("Platform rejected the video: {0}")]
    UpstreamRejected(String),

    /// A network or payload-shape failure at some stage. Triggers the next
    /// fallback tier, or the reduced offline path when it hits the
    /// metadata boundary.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A generative capability failed or returned malformed structured
    /// output. Stages downgrade this to an empty result; it never
    /// propagates out of the acquisition pipeline.
    #[error("Generative call failed: {0}")]
    Generative(String),

    #[error("No active session: load a video before chatting")]
    SessionNotInitialized,
}

impl VidgistError {
    /// Whether this error is a transport-level failure (network down,
    /// unparseable payload) as opposed to an explicit platform rejection.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            VidgistError::Transport(_) | VidgistError::Http(_) | VidgistError::Json(_)
        )
    }
}

/// Result type alias for vidgist operations.
pub type Result<T> = std::result::Result<T, VidgistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(VidgistError::Transport("connection refused".into()).is_transport());
        assert!(!VidgistError::UpstreamRejected("gone".into()).is_transport());
        assert!(!VidgistError::InvalidReference("nope".into()).is_transport());
        assert!(!VidgistError::SessionNotInitialized.is_transport());
    }
}
