//! Plugin configuration loaded from environment variables.
//!
//! Each plugin gets an explicit config struct enumerating its required
//! keys and endpoint defaults; missing required keys fail at load time,
//! not on the first invocation. Sections with required keys are optional
//! at the top level so a host can configure only the plugins it uses.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration covering every builtin plugin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginsConfig {
    pub weather: Option<WeatherConfig>,
    pub localtime: Option<LocaltimeConfig>,
    #[serde(default)]
    pub currency: CurrencyConfig,
    pub stock: Option<StockConfig>,
    pub flickr: Option<FlickrConfig>,
    pub room_temp: Option<RoomTempConfig>,
    pub capture_image: Option<CaptureImageConfig>,
    #[serde(default)]
    pub hateb: HatebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaltimeConfig {
    pub api_key: String,
    #[serde(default = "default_localtime_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockConfig {
    pub api_key: String,
    #[serde(default = "default_stock_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlickrConfig {
    pub api_key: String,
    #[serde(default = "default_flickr_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomTempConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureImageConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HatebConfig {
    #[serde(default = "default_hateb_feed_base_url")]
    pub feed_base_url: String,
    /// Override for the gist API endpoint (used by tests).
    #[serde(default)]
    pub gist_endpoint: Option<String>,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            endpoint: default_currency_endpoint(),
        }
    }
}

impl Default for HatebConfig {
    fn default() -> Self {
        Self {
            feed_base_url: default_hateb_feed_base_url(),
            gist_endpoint: None,
        }
    }
}

// Default value functions
fn default_weather_endpoint() -> String {
    "http://api.worldweatheronline.com/free/v2/weather.ashx".into()
}

fn default_localtime_endpoint() -> String {
    "https://api.worldweatheronline.com/free/v2/tz.ashx".into()
}

fn default_currency_endpoint() -> String {
    "http://api.fixer.io".into()
}

fn default_stock_endpoint() -> String {
    "http://marketdata.websol.barchart.com".into()
}

fn default_flickr_endpoint() -> String {
    "https://api.flickr.com/services/rest".into()
}

fn default_hateb_feed_base_url() -> String {
    "http://b.hatena.ne.jp".into()
}

impl PluginsConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Keep strings as strings; ticker symbols and API keys
                    // must not be parsed as numbers.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
