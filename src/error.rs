//! Error taxonomy for the mood lookup.
//!
//! Every variant displays as the exact text shown in the error banner.
//! A missing credential is not an error: it is the unauthenticated state.

use thiserror::Error;

pub const RECENTLY_PLAYED_FAILED: &str = "Failed to fetch recently played tracks.";
pub const AUDIO_FEATURES_FAILED: &str = "Failed to fetch audio features.";
pub const NO_RECENT_TRACKS: &str = "No recent tracks found.";
pub const NO_AUDIO_FEATURES: &str = "No audio features available.";

/// Failures of the loading sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodError {
    /// Non-success HTTP status. Carries the fixed per-endpoint message.
    #[error("{0}")]
    Api(&'static str),

    /// Zero tracks or zero usable feature samples.
    #[error("{0}")]
    EmptyResult(&'static str),

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded.
    #[error("{0}")]
    Malformed(String),
}

impl From<reqwest::Error> for MoodError {
    fn from(err: reqwest::Error) -> Self {
        MoodError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for MoodError {
    fn from(err: serde_json::Error) -> Self {
        MoodError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_rendered_verbatim() {
        assert_eq!(
            MoodError::Api(RECENTLY_PLAYED_FAILED).to_string(),
            "Failed to fetch recently played tracks."
        );
        assert_eq!(
            MoodError::Api(AUDIO_FEATURES_FAILED).to_string(),
            "Failed to fetch audio features."
        );
        assert_eq!(
            MoodError::EmptyResult(NO_RECENT_TRACKS).to_string(),
            "No recent tracks found."
        );
        assert_eq!(
            MoodError::EmptyResult(NO_AUDIO_FEATURES).to_string(),
            "No audio features available."
        );
    }

    #[test]
    fn test_json_errors_become_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(MoodError::from(err), MoodError::Malformed(_)));
    }
}
