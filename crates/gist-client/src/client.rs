//! Gist HTTP client.

use crate::error::GistError;
use crate::types::*;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_ENDPOINT: &str = "https://api.github.com";

/// Client for creating hosted text snippets (gists).
#[derive(Clone)]
pub struct GistClient {
    client: Client,
    base_url: String,
}

impl GistClient {
    /// Create a client against the default API endpoint.
    pub fn new() -> Result<Self, GistError> {
        Self::with_base_url(DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GistError> {
        let client = Client::builder()
            .user_agent("gist-client")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a gist with a single file and return its HTML URL.
    #[instrument(skip(self, content))]
    pub async fn create(
        &self,
        description: &str,
        public: bool,
        filename: &str,
        content: &str,
    ) -> Result<String, GistError> {
        let mut files = HashMap::new();
        files.insert(
            filename.to_string(),
            GistFile {
                content: content.to_string(),
            },
        );

        let request = CreateGistRequest {
            description: description.to_string(),
            public,
            files,
        };

        let response = self
            .client
            .post(format!("{}/gists", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GistError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreateGistResponse = response.json().await?;
        debug!(url = %created.html_url, "Created gist");
        Ok(created.html_url)
    }
}
