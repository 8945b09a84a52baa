//! Hot-entry bookmark feed command.
//!
//! Fetches a category's RSS feed, publishes a markdown rendering of the
//! entries as a gist (skipped when the feed has not changed since the last
//! publish), and replies with the top entries plus a link to the gist.

use crate::config::HatebConfig;
use crate::error::PluginError;
use crate::types::{
    AttachmentField, ChatMessage, CommandMessage, MessageAttachment, Plugin, Reply,
};
use async_trait::async_trait;
use feed_cache::{ContentCache, Entry, Feed, FeedPublisher, PublishError};
use gist_client::{GistClient, GistError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

const MAX_LISTED_ENTRIES: usize = 10;

/// Allowed feed categories, in the order shown to the user.
const CATEGORIES: &[&str] = &[
    "economics",
    "entertainment",
    "fun",
    "game",
    "general",
    "hotentry",
    "it",
    "knowledge",
    "life",
    "social",
];

/// `.hateb` command.
pub struct HatebPlugin {
    client: Client,
    feed_base_url: String,
    cache: ContentCache,
    gist: GistClient,
}

#[derive(Deserialize)]
struct RssDocument {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Deserialize)]
struct RssItem {
    title: String,
    link: String,
    #[serde(default)]
    description: String,
    // quick-xml strips namespace prefixes, so `hatena:bookmarkcount` appears as
    // `bookmarkcount` to serde.
    #[serde(rename = "bookmarkcount", default)]
    bookmark_count: u32,
}

/// Renders a feed as a markdown entry list and posts it as a gist.
struct GistPublisher<'a> {
    gist: &'a GistClient,
}

#[async_trait]
impl FeedPublisher for GistPublisher<'_> {
    async fn publish(&self, feed: &Feed) -> Result<String, PublishError> {
        let content = feed
            .entries
            .iter()
            .map(|e| {
                format!(
                    "- [{}]({}) ({})  \n{}  ",
                    e.title, e.link, e.bookmark_count, e.summary
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        self.gist
            .create("hot entry", false, "entries.md", &content)
            .await
            .map_err(|e| match e {
                GistError::Http(err) => PublishError::Http(err),
                other => PublishError::Service(other.to_string()),
            })
    }
}

impl HatebPlugin {
    pub fn new(config: HatebConfig) -> Result<Self, GistError> {
        let gist = match config.gist_endpoint {
            Some(endpoint) => GistClient::with_base_url(endpoint)?,
            None => GistClient::new()?,
        };

        Ok(Self {
            client: Client::new(),
            feed_base_url: config.feed_base_url,
            cache: ContentCache::new(),
            gist,
        })
    }

    fn help_message() -> String {
        format!(
            "Please choose a category from below:\n{}",
            CATEGORIES.join(", ")
        )
    }

    fn feed_url(&self, category: &str) -> String {
        // The uncategorized hot-entry feed has the shorter path.
        if category == "hotentry" {
            format!("{}/hotentry.rss", self.feed_base_url)
        } else {
            format!("{}/hotentry/{}.rss", self.feed_base_url, category)
        }
    }

    async fn retrieve_feed(&self, category: &str) -> Result<Feed, PluginError> {
        let url = self.feed_url(category);
        debug!(url = %url, "Fetching bookmark feed");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let document: RssDocument = quick_xml::de::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Failed to decode RSS feed");
            PluginError::decode(e)
        })?;

        let entries = document
            .items
            .into_iter()
            .map(|item| Entry {
                link: item.link,
                title: item.title,
                summary: item.description,
                bookmark_count: item.bookmark_count,
            })
            .collect();

        Ok(Feed::new(category, entries))
    }
}

#[async_trait]
impl Plugin for HatebPlugin {
    fn name(&self) -> &str {
        "hateb"
    }

    fn trigger(&self) -> &str {
        ".hateb"
    }

    async fn execute(&self, msg: &CommandMessage) -> Result<Reply, PluginError> {
        let category = msg.text.trim();
        if !CATEGORIES.contains(&category) {
            return Err(PluginError::InvalidQuery(Self::help_message()));
        }

        let feed = self.retrieve_feed(category).await?;

        let publisher = GistPublisher { gist: &self.gist };
        let gist_url = self.cache.publish_if_new(&feed, &publisher).await?;

        let mut attachments: Vec<MessageAttachment> = feed
            .entries
            .iter()
            .take(MAX_LISTED_ENTRIES)
            .map(|e| MessageAttachment {
                fallback: format!("[{}] {} : {}", e.bookmark_count, e.title, e.link),
                title: Some(e.title.clone()),
                title_link: Some(e.link.clone()),
                color: Some("#00FF00".into()),
                fields: vec![AttachmentField::new(
                    "Bookmark Count",
                    e.bookmark_count.to_string(),
                    false,
                )],
                ..Default::default()
            })
            .collect();

        attachments.push(MessageAttachment {
            fallback: format!("See more at {}", gist_url),
            title: Some("See More".into()),
            title_link: Some(gist_url),
            ..Default::default()
        });

        Ok(Reply::Message(ChatMessage::new(
            format!("Category: {}", category),
            attachments,
        )))
    }
}
