//! Plugin pipeline errors.

use feed_cache::PublishError;
use thiserror::Error;

/// Failure classes of the fetch-parse-format pipeline.
///
/// Each class maps to a distinct, stable user-facing message; the
/// dispatcher performs that translation after logging the cause.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Connection or HTTP-level failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not valid in its declared format.
    #[error("failed to decode response: {reason}")]
    Decode { reason: String },

    /// Upstream reported an error payload, or the expected top-level
    /// field was missing after a successful decode.
    #[error("upstream error: {}", .message.as_deref().unwrap_or("malformed response"))]
    Semantic { message: Option<String> },

    /// An expected nested field was missing after semantic checks passed.
    #[error("missing field: {0}")]
    Extraction(String),

    /// Publishing an external artifact failed.
    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),

    /// The query did not match the plugin's expected format. Carries the
    /// help text shown to the user.
    #[error("query did not match expected format")]
    InvalidQuery(String),

    /// Anything that does not fit the other classes.
    #[error("unexpected failure: {0}")]
    Other(String),
}

impl PluginError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }

    pub fn extraction(field: impl Into<String>) -> Self {
        Self::Extraction(field.into())
    }

    /// The stable reply text shown to the user for this failure class.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Request error.".into(),
            Self::Decode { .. } | Self::Extraction(_) => "Error on parsing response.".into(),
            Self::Semantic { message: Some(msg) } => format!("Error returned: {}", msg),
            Self::Semantic { message: None } => "Invalid response format.".into(),
            Self::Publish(_) => "Failed to publish entries.".into(),
            Self::InvalidQuery(help) => help.clone(),
            Self::Other(_) => "Unknown error occurred.".into(),
        }
    }
}
