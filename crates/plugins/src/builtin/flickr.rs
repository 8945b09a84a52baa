//! Interesting-photos command backed by the Flickr REST API.
//!
//! Issues one call for the interestingness list, then one best-effort
//! location lookup per photo, sequentially. Location failures are logged
//! and skipped; they never fail the invocation.

use crate::config::FlickrConfig;
use crate::error::PluginError;
use crate::pipeline::fetch_json;
use crate::types::{ChatMessage, CommandMessage, MessageAttachment, Plugin, Reply};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

const MAX_PHOTOS: usize = 20;

/// `.flickr` command.
pub struct FlickrPlugin {
    client: Client,
    api_key: SecretString,
    endpoint: String,
}

#[derive(Deserialize)]
struct InterestingnessResponse {
    stat: String,
    message: Option<String>,
    photos: Option<PhotoPage>,
}

#[derive(Deserialize)]
struct PhotoPage {
    #[serde(default)]
    photo: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    id: String,
    owner: String,
    secret: String,
    server: String,
    farm: u32,
    title: String,
}

#[derive(Deserialize)]
struct GeoResponse {
    stat: String,
    message: Option<String>,
    photo: Option<GeoPhoto>,
}

#[derive(Deserialize)]
struct GeoPhoto {
    location: Option<GeoLocation>,
}

#[derive(Deserialize)]
struct GeoLocation {
    latitude: String,
    longitude: String,
    locality: Option<PlaceName>,
    county: Option<PlaceName>,
    region: Option<PlaceName>,
    country: Option<PlaceName>,
}

#[derive(Deserialize)]
struct PlaceName {
    #[serde(rename = "_content")]
    name: String,
}

struct LocationInfo {
    name: String,
    map_url: String,
}

impl FlickrPlugin {
    pub fn new(config: FlickrConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(config.api_key),
            endpoint: config.endpoint,
        }
    }

    async fn lookup_location(&self, photo_id: &str) -> Result<LocationInfo, PluginError> {
        let response: GeoResponse = fetch_json(self.client.get(&self.endpoint).query(&[
            ("method", "flickr.photos.geo.getLocation"),
            ("api_key", self.api_key.expose_secret()),
            ("photo_id", photo_id),
            ("format", "json"),
            ("nojsoncallback", "1"),
        ]))
        .await?;

        if response.stat != "ok" {
            // Photos without a registered location come back as stat=fail.
            return Err(PluginError::Semantic {
                message: response.message,
            });
        }

        let location = response
            .photo
            .and_then(|p| p.location)
            .ok_or_else(|| PluginError::extraction("photo.location"))?;

        let name_parts: Vec<String> = [
            &location.locality,
            &location.county,
            &location.region,
            &location.country,
        ]
        .into_iter()
        .flatten()
        .map(|place| place.name.clone())
        .filter(|name| !name.is_empty())
        .collect();

        let name = if name_parts.is_empty() {
            format!("{}, {}", location.latitude, location.longitude)
        } else {
            name_parts.join(", ")
        };

        let map_url = format!(
            "https://www.flickr.com/map/?fLat={}&fLon={}&zl=13&everyone_nearby=1",
            location.latitude, location.longitude
        );

        Ok(LocationInfo { name, map_url })
    }
}

#[async_trait]
impl Plugin for FlickrPlugin {
    fn name(&self) -> &str {
        "flickr"
    }

    fn trigger(&self) -> &str {
        ".flickr"
    }

    async fn execute(&self, _msg: &CommandMessage) -> Result<Reply, PluginError> {
        let response: InterestingnessResponse =
            fetch_json(self.client.get(&self.endpoint).query(&[
                ("method", "flickr.interestingness.getList"),
                ("api_key", self.api_key.expose_secret()),
                ("format", "json"),
                ("nojsoncallback", "1"),
            ]))
            .await?;

        if response.stat != "ok" {
            return Err(PluginError::Semantic {
                message: response.message,
            });
        }

        let photos = response
            .photos
            .ok_or_else(|| PluginError::extraction("photos"))?
            .photo;

        if photos.is_empty() {
            debug!("No interesting photos found, suppressing output");
            return Ok(Reply::Empty);
        }

        let mut attachments = Vec::new();
        for photo in photos.iter().take(MAX_PHOTOS) {
            let location = match self.lookup_location(&photo.id).await {
                Ok(location) => Some(location),
                Err(e) => {
                    debug!(photo_id = %photo.id, error = %e, "Skipping location enrichment");
                    None
                }
            };

            attachments.push(MessageAttachment {
                fallback: photo.title.clone(),
                title: Some(photo.title.clone()),
                title_link: Some(format!(
                    "https://www.flickr.com/photos/{}/{}",
                    photo.owner, photo.id
                )),
                thumb_url: Some(format!(
                    "https://farm{}.staticflickr.com/{}/{}_{}_m.jpg",
                    photo.farm, photo.server, photo.id, photo.secret
                )),
                author_name: location.as_ref().map(|l| l.name.clone()),
                author_link: location.as_ref().map(|l| l.map_url.clone()),
                ..Default::default()
            });
        }

        Ok(Reply::Message(ChatMessage::new(
            "\"Interesting\" photos on Flickr",
            attachments,
        )))
    }
}
