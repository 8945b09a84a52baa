//! Content-change cache for the bookmark-feed plugin.
//!
//! Holds the most recently published feed/URL pair and skips the external
//! publish side effect when newly fetched content is structurally equal to
//! what was last published. In-memory only; nothing survives a restart.

mod cache;
mod error;
mod types;

pub use cache::{ContentCache, FeedPublisher};
pub use error::PublishError;
pub use types::*;
