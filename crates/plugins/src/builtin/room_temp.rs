//! Room temperature command backed by a local sensor endpoint.

use crate::config::RoomTempConfig;
use crate::error::PluginError;
use crate::pipeline::{fetch_json, field_text};
use crate::types::{CommandMessage, Plugin, Reply};
use async_trait::async_trait;
use reqwest::Client;

/// `.room_temp` command. The sensor returns `{value, message}`.
pub struct RoomTempPlugin {
    client: Client,
    endpoint: String,
}

impl RoomTempPlugin {
    pub fn new(config: RoomTempConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint,
        }
    }
}

#[async_trait]
impl Plugin for RoomTempPlugin {
    fn name(&self) -> &str {
        "room_temp"
    }

    fn trigger(&self) -> &str {
        ".room_temp"
    }

    async fn execute(&self, _msg: &CommandMessage) -> Result<Reply, PluginError> {
        let body: serde_json::Value = fetch_json(self.client.get(&self.endpoint)).await?;

        let value = field_text(&body, "value")?;
        let message = field_text(&body, "message")?;

        Ok(Reply::text(format!("{}\n{}", value, message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn command() -> CommandMessage {
        CommandMessage {
            original_text: ".room_temp".into(),
            text: String::new(),
            sender: "user-1".into(),
        }
    }

    #[tokio::test]
    async fn test_sensor_reading() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": 21.5,
                "message": "Comfortable"
            })))
            .mount(&server)
            .await;

        let plugin = RoomTempPlugin::new(RoomTempConfig {
            endpoint: server.uri(),
        });
        let reply = plugin.execute(&command()).await.unwrap();

        assert_eq!(reply, Reply::text("21.5\nComfortable"));
    }

    #[tokio::test]
    async fn test_missing_value_field() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
            )
            .mount(&server)
            .await;

        let plugin = RoomTempPlugin::new(RoomTempConfig {
            endpoint: server.uri(),
        });
        let err = plugin.execute(&command()).await.unwrap_err();

        assert!(matches!(err, PluginError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("sensor offline"))
            .mount(&server)
            .await;

        let plugin = RoomTempPlugin::new(RoomTempConfig {
            endpoint: server.uri(),
        });
        let err = plugin.execute(&command()).await.unwrap_err();

        assert!(matches!(err, PluginError::Decode { .. }));
    }
}
