use crate::twitter::types::Tweet;
use chrono::{DateTime, Utc};
use roundup_core::PostRecord;

/// Convert an API tweet into a [`PostRecord`].
///
/// The timestamp is required and converted to UTC; tweets without a parsable
/// `created_at` are dropped. Missing counters count as zero.
pub fn tweet_to_post(tweet: &Tweet) -> Option<PostRecord> {
    let created_at = tweet
        .created_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc));

    let Some(created_at) = created_at else {
        tracing::warn!(tweet_id = %tweet.id, raw = ?tweet.created_at, "tweet.skipped.no_timestamp");
        return None;
    };

    let metrics = tweet.public_metrics.clone().unwrap_or_default();
    Some(PostRecord::new(
        tweet.text.clone(),
        metrics.retweet_count.unwrap_or(0),
        metrics.like_count.unwrap_or(0),
        created_at,
    ))
}
