//! Shared fetch and extraction stages of the plugin pipeline.

use crate::error::PluginError;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::error;

/// Issue the request and decode the body as JSON.
///
/// Transport failures and decode failures surface as distinct error
/// classes; the raw body is logged when decoding fails.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, PluginError> {
    let response = request.send().await?;
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        error!(error = %e, body = %body, "Failed to decode JSON response");
        PluginError::decode(e)
    })
}

/// Extract a field from a decoded JSON object as display text.
///
/// String values are returned as-is; other values keep their JSON
/// rendering. A missing key is an extraction failure.
pub(crate) fn field_text(value: &serde_json::Value, key: &str) -> Result<String, PluginError> {
    let field = value.get(key).ok_or_else(|| {
        error!(field = key, body = %value, "Expected field missing from response");
        PluginError::extraction(key)
    })?;

    Ok(match field {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
