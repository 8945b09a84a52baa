//! Currency conversion command backed by a fixer-style rates API.

use crate::config::CurrencyConfig;
use crate::error::PluginError;
use crate::pipeline::fetch_json;
use crate::types::{CommandMessage, Plugin, Reply};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

const HELP_MESSAGE: &str = "Please input command in a form below:\n\
    .currency {AMOUNT_NUMBER} {BASE_CURRENCY} to {TARGET_CURRENCY}\n\
    e.g. .currency 100 JPY to USD";

/// `.currency` command.
pub struct CurrencyPlugin {
    client: Client,
    endpoint: String,
    pattern: Regex,
}

#[derive(Deserialize)]
struct RatesResponse {
    error: Option<String>,
    rates: Option<HashMap<String, f64>>,
}

/// Parsed conversion request.
#[derive(Debug, PartialEq)]
struct ConversionQuery {
    amount: f64,
    from: String,
    to: String,
}

impl CurrencyPlugin {
    pub fn new(config: CurrencyConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint,
            // Decimal amount, 3-letter code, preposition, 3-letter code.
            pattern: Regex::new(
                r"^(\d+(?:\.\d+)?)\s*([a-zA-Z]{3})\s+(?:in|as|of|to)\s+([a-zA-Z]{3})",
            )
            .expect("currency pattern is valid"),
        }
    }

    fn parse_query(&self, text: &str) -> Result<ConversionQuery, PluginError> {
        let caps = self
            .pattern
            .captures(text)
            .ok_or_else(|| PluginError::InvalidQuery(HELP_MESSAGE.into()))?;

        let amount: f64 = caps[1]
            .parse()
            .map_err(|_| PluginError::InvalidQuery(HELP_MESSAGE.into()))?;

        Ok(ConversionQuery {
            amount,
            from: caps[2].to_uppercase(),
            to: caps[3].to_uppercase(),
        })
    }
}

#[async_trait]
impl Plugin for CurrencyPlugin {
    fn name(&self) -> &str {
        "currency"
    }

    fn trigger(&self) -> &str {
        ".currency"
    }

    async fn execute(&self, msg: &CommandMessage) -> Result<Reply, PluginError> {
        let query = self.parse_query(&msg.text)?;
        debug!(amount = query.amount, from = %query.from, to = %query.to, "Converting currency");

        // The API returns rates relative to `base`, so ask for the target
        // currency as base and divide.
        let response: RatesResponse = fetch_json(
            self.client
                .get(format!("{}/latest", self.endpoint))
                .query(&[("base", query.to.as_str()), ("symbols", query.from.as_str())]),
        )
        .await?;

        if let Some(message) = response.error {
            return Err(PluginError::Semantic {
                message: Some(message),
            });
        }

        let rates = response
            .rates
            .ok_or(PluginError::Semantic { message: None })?;

        let rate = rates
            .get(&query.from)
            .copied()
            .ok_or_else(|| PluginError::extraction(format!("rates.{}", query.from)))?;

        let converted = query.amount / rate;
        Ok(Reply::text(format!(
            "{:.2} (1{} = {}{})",
            converted, query.to, rate, query.from
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn plugin(endpoint: String) -> CurrencyPlugin {
        CurrencyPlugin::new(CurrencyConfig { endpoint })
    }

    fn command(text: &str) -> CommandMessage {
        CommandMessage {
            original_text: format!(".currency {}", text),
            text: text.into(),
            sender: "user-1".into(),
        }
    }

    #[test]
    fn test_parse_query_matches_example() {
        let plugin = plugin("http://unused".into());
        let query = plugin.parse_query("100 JPY to USD").unwrap();

        assert_eq!(
            query,
            ConversionQuery {
                amount: 100.0,
                from: "JPY".into(),
                to: "USD".into(),
            }
        );
    }

    #[test]
    fn test_parse_query_accepts_decimal_and_prepositions() {
        let plugin = plugin("http://unused".into());

        assert!(plugin.parse_query("12.50 eur in gbp").is_ok());
        assert!(plugin.parse_query("1 USD as CAD").is_ok());
        assert!(plugin.parse_query("30 AUD of NZD").is_ok());
    }

    #[test]
    fn test_parse_query_rejects_free_text() {
        let plugin = plugin("http://unused".into());
        let err = plugin.parse_query("convert money").unwrap_err();

        match err {
            PluginError::InvalidQuery(help) => assert_eq!(help, HELP_MESSAGE),
            other => panic!("Expected invalid query, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_matching_query_makes_no_network_call() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would panic the mock server check.

        let plugin = plugin(server.uri());
        let err = plugin.execute(&command("convert money")).await.unwrap_err();

        assert!(matches!(err, PluginError::InvalidQuery(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_convert_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", "USD"))
            .and(query_param("symbols", "JPY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "base": "USD",
                "date": "2016-03-01",
                "rates": {"JPY": 113.86}
            })))
            .mount(&server)
            .await;

        let plugin = plugin(server.uri());
        let reply = plugin.execute(&command("100 JPY to USD")).await.unwrap();

        assert_eq!(reply, Reply::text("0.88 (1USD = 113.86JPY)"));
    }

    #[tokio::test]
    async fn test_upstream_error_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "Invalid base"
            })))
            .mount(&server)
            .await;

        let plugin = plugin(server.uri());
        let err = plugin.execute(&command("100 JPY to XXX")).await.unwrap_err();

        match err {
            PluginError::Semantic { message } => {
                assert_eq!(message.as_deref(), Some("Invalid base"));
            }
            other => panic!("Expected semantic error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_rates_field() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"base": "USD", "date": "2016-03-01"})),
            )
            .mount(&server)
            .await;

        let plugin = plugin(server.uri());
        let err = plugin.execute(&command("100 JPY to USD")).await.unwrap_err();

        assert!(matches!(err, PluginError::Semantic { message: None }));
    }

    #[tokio::test]
    async fn test_missing_symbol_rate_is_extraction_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "base": "USD",
                "rates": {"EUR": 0.92}
            })))
            .mount(&server)
            .await;

        let plugin = plugin(server.uri());
        let err = plugin.execute(&command("100 JPY to USD")).await.unwrap_err();

        assert!(matches!(err, PluginError::Extraction(_)));
    }
}
