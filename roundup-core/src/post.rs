use chrono::{DateTime, Utc};

/// A single post fetched from a list, normalized by the data source.
///
/// Records are never mutated by the pipeline. Reach is derived on demand so
/// it always reflects the current counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    text: String,
    retweet_count: u64,
    favorite_count: u64,
    created_at: DateTime<Utc>,
}

impl PostRecord {
    pub fn new(
        text: impl Into<String>,
        retweet_count: u64,
        favorite_count: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            text: text.into(),
            retweet_count,
            favorite_count,
            created_at,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn retweet_count(&self) -> u64 {
        self.retweet_count
    }

    pub fn favorite_count(&self) -> u64 {
        self.favorite_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Engagement score: reposts plus favorites.
    pub fn reach(&self) -> u64 {
        self.retweet_count.saturating_add(self.favorite_count)
    }
}
