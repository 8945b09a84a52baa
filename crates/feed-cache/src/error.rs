//! Publish errors.

use thiserror::Error;

/// Errors from publishing a feed rendering to an external service.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Publish service error: {0}")]
    Service(String),
}
