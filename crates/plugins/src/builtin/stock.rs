//! Stock price history command backed by the Barchart market data API.

use crate::config::StockConfig;
use crate::error::PluginError;
use crate::pipeline::fetch_json;
use crate::types::{
    AttachmentField, ChatMessage, CommandMessage, MessageAttachment, Plugin, Reply,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

const HISTORY_DAYS: i64 = 10;

/// `.stock` command.
pub struct StockPlugin {
    client: Client,
    api_key: SecretString,
    endpoint: String,
}

#[derive(Deserialize)]
struct HistoryResponse {
    status: Option<ApiStatus>,
    results: Option<Vec<DailyQuote>>,
}

#[derive(Deserialize)]
struct ApiStatus {
    code: i64,
    message: Option<String>,
}

#[derive(Deserialize)]
struct DailyQuote {
    #[serde(rename = "tradingDay")]
    trading_day: String,
    open: f64,
    close: f64,
    low: f64,
    volume: i64,
}

impl StockPlugin {
    pub fn new(config: StockConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(config.api_key),
            endpoint: config.endpoint,
        }
    }
}

#[async_trait]
impl Plugin for StockPlugin {
    fn name(&self) -> &str {
        "stock"
    }

    fn trigger(&self) -> &str {
        ".stock"
    }

    async fn execute(&self, msg: &CommandMessage) -> Result<Reply, PluginError> {
        let symbol = msg.text.trim();
        if symbol.is_empty() {
            return Err(PluginError::InvalidQuery(
                "Please enter ticker symbol.".into(),
            ));
        }

        let start_date = (Utc::now() - Duration::days(HISTORY_DAYS))
            .format("%Y-%m-%dT00:00:00")
            .to_string();
        debug!(symbol = %symbol, start_date = %start_date, "Fetching stock history");

        let response: HistoryResponse = fetch_json(
            self.client
                .get(format!("{}/getHistory.json", self.endpoint))
                .query(&[
                    ("key", self.api_key.expose_secret().as_str()),
                    ("symbol", symbol),
                    ("startDate", &start_date),
                    ("order", "desc"),
                    ("type", "daily"),
                ]),
        )
        .await?;

        let status = response
            .status
            .ok_or(PluginError::Semantic { message: None })?;
        if status.code != 200 {
            return Err(PluginError::Semantic {
                message: status.message,
            });
        }

        let results = response
            .results
            .ok_or_else(|| PluginError::extraction("results"))?;

        let attachments = results
            .iter()
            .map(|quote| MessageAttachment {
                fallback: format!("{}: close {}", quote.trading_day, quote.close),
                title: Some(quote.trading_day.clone()),
                fields: vec![
                    AttachmentField::new("Open", quote.open.to_string(), true),
                    AttachmentField::new("Close", quote.close.to_string(), true),
                    AttachmentField::new("Low", quote.low.to_string(), true),
                    AttachmentField::new("Volume", quote.volume.to_string(), true),
                ],
                ..Default::default()
            })
            .collect();

        Ok(Reply::Message(ChatMessage::new(
            format!("Stock price history for {}", symbol),
            attachments,
        )))
    }
}
