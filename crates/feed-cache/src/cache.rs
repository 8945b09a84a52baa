//! Content-change cache guarding an external publish side effect.

use crate::error::PublishError;
use crate::types::{CachedContent, Feed};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Publishes a rendering of a feed somewhere durable and returns its URL.
#[async_trait]
pub trait FeedPublisher: Send + Sync {
    async fn publish(&self, feed: &Feed) -> Result<String, PublishError>;
}

/// Cache of the single most recently published feed.
///
/// `publish_if_new` serializes the whole check-then-publish-then-replace
/// sequence behind one lock, so concurrent invocations cannot publish the
/// same content twice or lose an update.
///
/// The cache is keyed to the most recent fetch only, not per category:
/// alternating between two categories makes every fetch look new even when
/// neither category's content changed.
pub struct ContentCache {
    cached: Mutex<Option<CachedContent>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self {
            cached: Mutex::new(None),
        }
    }

    /// Whether `feed` differs from the last published content.
    ///
    /// True when nothing has ever been published. Pure predicate; never
    /// mutates the cache.
    pub async fn is_new(&self, feed: &Feed) -> bool {
        let cached = self.cached.lock().await;
        match cached.as_ref() {
            Some(content) => content.feed != *feed,
            None => true,
        }
    }

    /// Publish `feed` unless it matches the cached content.
    ///
    /// Returns the URL of the published rendering; for unchanged content
    /// this is the cached URL and no external call is made. A failed
    /// publish leaves the cache untouched.
    pub async fn publish_if_new(
        &self,
        feed: &Feed,
        publisher: &dyn FeedPublisher,
    ) -> Result<String, PublishError> {
        let mut cached = self.cached.lock().await;

        if let Some(content) = cached.as_ref() {
            if content.feed == *feed {
                debug!(category = %feed.category, "Feed unchanged, reusing published URL");
                return Ok(content.gist_url.clone());
            }
        }

        let gist_url = publisher.publish(feed).await?;
        info!(category = %feed.category, url = %gist_url, "Published new feed content");

        *cached = Some(CachedContent {
            feed: feed.clone(),
            gist_url: gist_url.clone(),
        });

        Ok(gist_url)
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}
