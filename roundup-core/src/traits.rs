use crate::error::{SourceFailure, SummarizerFailure};
use crate::post::PostRecord;
use crate::window::TimeWindow;
use async_trait::async_trait;

/// Text-in/text-out summarization service.
///
/// Implementations own their transport details (model, temperature,
/// endpoint). Any failure, including an oversized payload, is reported as an
/// error rather than a truncated request.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, system_prompt: &str, payload: &str)
        -> Result<String, SummarizerFailure>;
}

/// Supplier of the posts of a list.
///
/// The window is a hint; sources may return posts outside it and the
/// pipeline filters again.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(
        &self,
        list_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<PostRecord>, SourceFailure>;
}
