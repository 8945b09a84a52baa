//! Gist API request and response types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request body for creating a gist.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGistRequest {
    pub description: String,
    pub public: bool,
    pub files: HashMap<String, GistFile>,
}

/// A single file within a gist.
#[derive(Debug, Clone, Serialize)]
pub struct GistFile {
    pub content: String,
}

/// Response returned for a created gist. Only the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGistResponse {
    pub html_url: String,
}
