//! X/Twitter list integration: HTTP client, response models, and the
//! conversion from API tweets into [`roundup_core::PostRecord`]s.
pub mod client;
pub mod extract;
pub mod list_id;
pub mod types;

pub use client::TwitterApi;
pub use extract::tweet_to_post;
pub use list_id::normalize_list_id;
