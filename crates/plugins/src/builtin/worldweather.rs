//! Weather and local-time commands backed by the World Weather Online API.
//!
//! Both endpoints share the same response envelope: a top-level `data`
//! object that either carries the payload or an `error` array with an
//! upstream message.

use crate::config::{LocaltimeConfig, WeatherConfig};
use crate::error::PluginError;
use crate::pipeline::fetch_json;
use crate::types::{
    AttachmentField, ChatMessage, CommandMessage, MessageAttachment, Plugin, Reply,
};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<ApiData<T>>,
}

#[derive(Deserialize)]
struct ApiData<T> {
    error: Option<Vec<ApiError>>,
    #[serde(flatten)]
    body: T,
}

#[derive(Deserialize)]
struct ApiError {
    msg: Option<String>,
}

#[derive(Deserialize)]
struct RequestEcho {
    query: String,
}

#[derive(Deserialize)]
struct ValueWrapper {
    value: String,
}

/// Apply the shared envelope checks: the `data` field must be present and
/// must not carry an upstream error payload.
fn unwrap_data<T>(envelope: Envelope<T>) -> Result<T, PluginError> {
    let data = envelope.data.ok_or_else(|| {
        error!("Response is missing the top-level data field");
        PluginError::Semantic { message: None }
    })?;

    if let Some(errors) = data.error {
        let message = errors.into_iter().next().and_then(|e| e.msg);
        error!(message = ?message, "API reported an error");
        return Err(PluginError::Semantic { message });
    }

    Ok(data.body)
}

async fn fetch_envelope<T: DeserializeOwned>(
    client: &Client,
    endpoint: &str,
    api_key: &SecretString,
    query: &str,
) -> Result<T, PluginError> {
    let envelope: Envelope<T> = fetch_json(client.get(endpoint).query(&[
        ("format", "json"),
        ("key", api_key.expose_secret()),
        ("q", query),
    ]))
    .await?;

    unwrap_data(envelope)
}

/// `.weather` command.
pub struct WeatherPlugin {
    client: Client,
    api_key: SecretString,
    endpoint: String,
}

#[derive(Deserialize)]
struct WeatherBody {
    #[serde(default)]
    request: Vec<RequestEcho>,
    #[serde(default)]
    current_condition: Vec<CurrentCondition>,
    #[serde(default)]
    weather: Vec<DailyForecast>,
}

#[derive(Deserialize)]
struct CurrentCondition {
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<ValueWrapper>,
    #[serde(rename = "weatherIconUrl", default)]
    weather_icon_url: Vec<ValueWrapper>,
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "temp_F")]
    temp_f: String,
    #[serde(rename = "windspeedMiles")]
    windspeed_miles: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    humidity: String,
}

#[derive(Deserialize)]
struct DailyForecast {
    #[serde(default)]
    astronomy: Vec<Astronomy>,
}

#[derive(Deserialize)]
struct Astronomy {
    sunrise: String,
    sunset: String,
    moonrise: String,
    moonset: String,
}

impl WeatherPlugin {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(config.api_key),
            endpoint: config.endpoint,
        }
    }
}

#[async_trait]
impl Plugin for WeatherPlugin {
    fn name(&self) -> &str {
        "weather"
    }

    fn trigger(&self) -> &str {
        ".weather"
    }

    async fn execute(&self, msg: &CommandMessage) -> Result<Reply, PluginError> {
        debug!(query = %msg.text, "Fetching weather");

        let body: WeatherBody =
            fetch_envelope(&self.client, &self.endpoint, &self.api_key, &msg.text).await?;

        let condition = body
            .current_condition
            .first()
            .ok_or_else(|| PluginError::extraction("current_condition"))?;
        let request = body
            .request
            .first()
            .ok_or_else(|| PluginError::extraction("request"))?;
        let forecast = body
            .weather
            .first()
            .ok_or_else(|| PluginError::extraction("weather"))?;
        let astronomy = forecast
            .astronomy
            .first()
            .ok_or_else(|| PluginError::extraction("weather.astronomy"))?;
        let desc = condition
            .weather_desc
            .first()
            .ok_or_else(|| PluginError::extraction("current_condition.weatherDesc"))?;
        let icon = condition
            .weather_icon_url
            .first()
            .ok_or_else(|| PluginError::extraction("current_condition.weatherIconUrl"))?;

        let description = format!(
            "Current weather at {} is {}.",
            request.query, desc.value
        );

        let attachments = vec![
            // Current condition overview
            MessageAttachment {
                fallback: description.clone(),
                pretext: Some("Current Condition".into()),
                title: Some(description),
                color: Some("#32CD32".into()),
                image_url: Some(icon.value.clone()),
                ..Default::default()
            },
            MessageAttachment {
                fallback: format!("Temperature: {} degrees Celsius.", condition.temp_c),
                title: Some("Temperature".into()),
                color: Some("#32CD32".into()),
                fields: vec![
                    AttachmentField::new("Fahrenheit", condition.temp_f.as_str(), true),
                    AttachmentField::new("Celsius", condition.temp_c.as_str(), true),
                ],
                ..Default::default()
            },
            MessageAttachment {
                fallback: format!("Wind speed: {} Km/h", condition.windspeed_kmph),
                title: Some("Wind Speed".into()),
                color: Some("#32CD32".into()),
                fields: vec![
                    AttachmentField::new("mi/h", condition.windspeed_miles.as_str(), true),
                    AttachmentField::new("km/h", condition.windspeed_kmph.as_str(), true),
                ],
                ..Default::default()
            },
            MessageAttachment {
                fallback: format!("Humidity: {} %", condition.humidity),
                title: Some("Humidity".into()),
                color: Some("#32CD32".into()),
                fields: vec![AttachmentField::new(
                    "Percentage",
                    condition.humidity.as_str(),
                    true,
                )],
                ..Default::default()
            },
            // Forecast
            MessageAttachment {
                fallback: format!(
                    "Sunrise at {}. Sunset at {}.",
                    astronomy.sunrise, astronomy.sunset
                ),
                pretext: Some("Forecast".into()),
                color: Some("#006400".into()),
                fields: vec![
                    AttachmentField::new("Sunrise", astronomy.sunrise.as_str(), true),
                    AttachmentField::new("Sunset", astronomy.sunset.as_str(), true),
                ],
                ..Default::default()
            },
            MessageAttachment {
                fallback: format!(
                    "Moonrise at {}. Moonset at {}.",
                    astronomy.moonrise, astronomy.moonset
                ),
                color: Some("#006400".into()),
                fields: vec![
                    AttachmentField::new("Moonrise", astronomy.moonrise.as_str(), true),
                    AttachmentField::new("Moonset", astronomy.moonset.as_str(), true),
                ],
                ..Default::default()
            },
        ];

        Ok(Reply::Message(ChatMessage::with_attachments(attachments)))
    }
}

/// `.localtime` command.
pub struct LocaltimePlugin {
    client: Client,
    api_key: SecretString,
    endpoint: String,
}

#[derive(Deserialize)]
struct LocaltimeBody {
    #[serde(default)]
    request: Vec<RequestEcho>,
    #[serde(default)]
    time_zone: Vec<TimeZone>,
}

#[derive(Deserialize)]
struct TimeZone {
    localtime: String,
    #[serde(rename = "utcOffset")]
    utc_offset: String,
}

impl LocaltimePlugin {
    pub fn new(config: LocaltimeConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(config.api_key),
            endpoint: config.endpoint,
        }
    }
}

#[async_trait]
impl Plugin for LocaltimePlugin {
    fn name(&self) -> &str {
        "localtime"
    }

    fn trigger(&self) -> &str {
        ".localtime"
    }

    async fn execute(&self, msg: &CommandMessage) -> Result<Reply, PluginError> {
        debug!(query = %msg.text, "Fetching local time");

        let body: LocaltimeBody =
            fetch_envelope(&self.client, &self.endpoint, &self.api_key, &msg.text).await?;

        let request = body
            .request
            .first()
            .ok_or_else(|| PluginError::extraction("request"))?;
        let time_zone = body
            .time_zone
            .first()
            .ok_or_else(|| PluginError::extraction("time_zone"))?;

        Ok(Reply::text(format!(
            "Current time at {} is {}\nUTC offset is {}",
            request.query, time_zone.localtime, time_zone.utc_offset
        )))
    }
}
