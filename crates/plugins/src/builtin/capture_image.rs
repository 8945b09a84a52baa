//! Camera snapshot command backed by a local capture endpoint.

use crate::config::CaptureImageConfig;
use crate::error::PluginError;
use crate::pipeline::{fetch_json, field_text};
use crate::types::{CommandMessage, Plugin, Reply};
use async_trait::async_trait;
use reqwest::Client;

/// `.capture_image` command. The endpoint returns `{url}` pointing at the
/// captured frame.
pub struct CaptureImagePlugin {
    client: Client,
    endpoint: String,
}

impl CaptureImagePlugin {
    pub fn new(config: CaptureImageConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint,
        }
    }
}

#[async_trait]
impl Plugin for CaptureImagePlugin {
    fn name(&self) -> &str {
        "capture_image"
    }

    fn trigger(&self) -> &str {
        ".capture_image"
    }

    async fn execute(&self, _msg: &CommandMessage) -> Result<Reply, PluginError> {
        let body: serde_json::Value = fetch_json(self.client.get(&self.endpoint)).await?;
        let url = field_text(&body, "url")?;

        Ok(Reply::Text(url))
    }
}
