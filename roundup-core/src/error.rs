use chrono::{DateTime, Utc};
use std::time::Duration;

/// Opaque failure reported by a [`crate::Summarizer`] implementation.
pub type SummarizerFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque failure reported by a [`crate::PostSource`] implementation.
pub type SourceFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced by the digest pipeline.
///
/// An empty window is not an error; see [`crate::DigestOutcome::NothingToSummarize`].
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    /// The requested window starts after it ends.
    #[error("invalid time range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A pipeline setting is out of bounds (e.g. a zero top-K cutoff).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The summarization collaborator failed or timed out.
    #[error("summarization failed: {0}")]
    Summarization(#[source] SummarizerFailure),

    /// The post source could not deliver posts.
    #[error("post source failed: {0}")]
    Source(#[source] SourceFailure),
}

impl DigestError {
    /// True for failures caused by caller input rather than a collaborator.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidRange { .. } | Self::InvalidConfig(_))
    }
}

/// Raised in place of a summarizer result when the call outlives its budget.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("summarizer timed out after {0:?}")]
pub struct SummarizerTimeout(pub Duration);
