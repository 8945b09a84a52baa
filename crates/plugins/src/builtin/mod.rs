//! Built-in command plugins.

mod capture_image;
mod currency;
mod flickr;
mod hateb;
mod room_temp;
mod stock;
mod worldweather;

pub use capture_image::CaptureImagePlugin;
pub use currency::CurrencyPlugin;
pub use flickr::FlickrPlugin;
pub use hateb::HatebPlugin;
pub use room_temp::RoomTempPlugin;
pub use stock::StockPlugin;
pub use worldweather::{LocaltimePlugin, WeatherPlugin};

use crate::config::PluginsConfig;
use crate::registry::PluginRegistry;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Build a registry holding every builtin the configuration enables.
/// Sections without required keys are always registered.
pub fn build_registry(config: PluginsConfig) -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::new();

    if let Some(weather) = config.weather {
        registry.register(Arc::new(WeatherPlugin::new(weather)));
    }
    if let Some(localtime) = config.localtime {
        registry.register(Arc::new(LocaltimePlugin::new(localtime)));
    }
    registry.register(Arc::new(CurrencyPlugin::new(config.currency)));
    if let Some(stock) = config.stock {
        registry.register(Arc::new(StockPlugin::new(stock)));
    }
    if let Some(flickr) = config.flickr {
        registry.register(Arc::new(FlickrPlugin::new(flickr)));
    }
    if let Some(room_temp) = config.room_temp {
        registry.register(Arc::new(RoomTempPlugin::new(room_temp)));
    }
    if let Some(capture_image) = config.capture_image {
        registry.register(Arc::new(CaptureImagePlugin::new(capture_image)));
    }
    registry.register(Arc::new(
        HatebPlugin::new(config.hateb).context("Failed to initialize hateb plugin")?,
    ));

    info!(triggers = ?registry.list_triggers(), "Registered builtin plugins");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoomTempConfig, StockConfig};

    #[test]
    fn test_default_config_registers_keyless_plugins() {
        let registry = build_registry(PluginsConfig::default()).unwrap();

        let triggers = registry.list_triggers();
        assert_eq!(triggers, vec![".currency", ".hateb"]);
    }

    #[test]
    fn test_configured_sections_are_registered() {
        let config = PluginsConfig {
            stock: Some(StockConfig {
                api_key: "key".into(),
                endpoint: "http://example.com".into(),
            }),
            room_temp: Some(RoomTempConfig {
                endpoint: "http://sensor.local".into(),
            }),
            ..Default::default()
        };

        let registry = build_registry(config).unwrap();
        let triggers = registry.list_triggers();

        assert!(triggers.contains(&".stock"));
        assert!(triggers.contains(&".room_temp"));
        assert!(triggers.contains(&".currency"));
        assert!(!triggers.contains(&".weather"));
    }
}
