//! Feed value types.

/// A single feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub link: String,
    pub title: String,
    pub summary: String,
    pub bookmark_count: u32,
}

/// A fetched feed: a category label plus its entries in feed order.
///
/// Equality is structural; two feeds with the same category and entries
/// compare equal regardless of when they were fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub category: String,
    pub entries: Vec<Entry>,
}

impl Feed {
    pub fn new(category: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            category: category.into(),
            entries,
        }
    }
}

/// The most recently published feed paired with the URL of its published
/// rendering. The two fields are always replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedContent {
    pub feed: Feed,
    pub gist_url: String,
}
