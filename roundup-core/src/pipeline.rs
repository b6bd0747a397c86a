use crate::error::{DigestError, SummarizerTimeout};
use crate::post::PostRecord;
use crate::rank::{check_top_k, rank_by_reach};
use crate::request::DigestRequest;
use crate::traits::{PostSource, Summarizer};
use crate::window::{filter_window, TimeWindow};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Budget for a single summarizer call.
pub const DEFAULT_SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(120);

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestOutcome {
    /// Digest text, trimmed.
    Digest(String),
    /// No post fell inside the window; the summarizer was not called.
    NothingToSummarize,
}

impl DigestOutcome {
    pub fn digest(&self) -> Option<&str> {
        match self {
            Self::Digest(text) => Some(text),
            Self::NothingToSummarize => None,
        }
    }
}

/// Filter → rank → build → summarize, one independent run per call.
///
/// The pipeline holds only its settings; it is `Copy` and safe to share
/// between concurrent callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestPipeline {
    top_k: usize,
    summarize_timeout: Duration,
}

impl DigestPipeline {
    pub fn new(top_k: usize) -> Result<Self, DigestError> {
        check_top_k(top_k)?;
        Ok(Self {
            top_k,
            summarize_timeout: DEFAULT_SUMMARIZE_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.summarize_timeout = timeout;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn summarize_timeout(&self) -> Duration {
        self.summarize_timeout
    }

    /// Produce a digest from already-fetched posts.
    ///
    /// The range is validated before anything else. An empty window
    /// short-circuits to [`DigestOutcome::NothingToSummarize`] without calling
    /// `summarizer`. The summarizer gets one attempt; failure or timeout is
    /// returned as [`DigestError::Summarization`].
    pub async fn produce_digest(
        &self,
        posts: &[PostRecord],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        summarizer: &dyn Summarizer,
    ) -> Result<DigestOutcome, DigestError> {
        let window = TimeWindow::new(start, end)?;
        self.run(posts, &window, summarizer).await
    }

    /// Fetch the posts of `list_id` from `source`, then produce a digest.
    ///
    /// An invalid range fails before the source is contacted.
    pub async fn digest_from_source(
        &self,
        source: &dyn PostSource,
        list_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        summarizer: &dyn Summarizer,
    ) -> Result<DigestOutcome, DigestError> {
        let window = TimeWindow::new(start, end)?;
        let posts = source
            .fetch_posts(list_id, &window)
            .await
            .map_err(DigestError::Source)?;
        self.run(&posts, &window, summarizer).await
    }

    async fn run(
        &self,
        posts: &[PostRecord],
        window: &TimeWindow,
        summarizer: &dyn Summarizer,
    ) -> Result<DigestOutcome, DigestError> {
        let in_window = filter_window(posts, window);
        if in_window.is_empty() {
            return Ok(DigestOutcome::NothingToSummarize);
        }

        let top = rank_by_reach(&in_window, self.top_k)?;
        let request = DigestRequest::build(&top);

        let call = summarizer.summarize(request.system_prompt(), request.payload());
        let text = match tokio::time::timeout(self.summarize_timeout, call).await {
            Ok(Ok(text)) => text,
            Ok(Err(cause)) => return Err(DigestError::Summarization(cause)),
            Err(_) => {
                return Err(DigestError::Summarization(Box::new(SummarizerTimeout(
                    self.summarize_timeout,
                ))))
            }
        };

        Ok(DigestOutcome::Digest(text.trim().to_string()))
    }
}

/// One-shot form of [`DigestPipeline::produce_digest`].
pub async fn produce_digest(
    posts: &[PostRecord],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    top_k: usize,
    summarizer: &dyn Summarizer,
) -> Result<DigestOutcome, DigestError> {
    // Range before cutoff so a bad window is reported first.
    TimeWindow::new(start, end)?;
    DigestPipeline::new(top_k)?
        .produce_digest(posts, start, end, summarizer)
        .await
}
