//! Ranking and summarization core for Roundup.
//!
//! Takes the posts fetched from a list, keeps the ones inside a closed time
//! window, ranks them by reach and hands the best of them to a summarization
//! capability to produce a newsletter-style digest.
//!
//! The crate performs no I/O of its own. Data sources and summarizers are
//! passed in as trait objects ([`PostSource`], [`Summarizer`]) at call time, and
//! nothing here logs; callers decide how outcomes are reported.
//!
//! # Overview
//!
//! - [`PostRecord`]: one normalized post
//! - [`TimeWindow`] / [`filter_window`]: inclusive creation-time filter
//! - [`rank_by_reach`]: top-K selection by retweets + favorites
//! - [`DigestRequest`]: delimited payload plus the fixed system instruction
//! - [`DigestPipeline`]: filter → rank → build → summarize
//!
//! # Examples
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use roundup_core::{filter_window, rank_by_reach, PostRecord, TimeWindow};
//!
//! let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap();
//! let posts = vec![
//!     PostRecord::new("quiet", 1, 1, day(2)),
//!     PostRecord::new("loud", 40, 2, day(3)),
//!     PostRecord::new("stale", 900, 900, day(20)),
//! ];
//!
//! let window = TimeWindow::new(day(1), day(4)).unwrap();
//! let in_window = filter_window(&posts, &window);
//! let ranked = rank_by_reach(&in_window, 10).unwrap();
//! assert_eq!(ranked, vec!["loud".to_string(), "quiet".to_string()]);
//! ```
pub mod error;
pub mod pipeline;
pub mod post;
pub mod rank;
pub mod request;
pub mod traits;
pub mod window;

pub use error::{DigestError, SourceFailure, SummarizerFailure, SummarizerTimeout};
pub use pipeline::{produce_digest, DigestOutcome, DigestPipeline, DEFAULT_SUMMARIZE_TIMEOUT};
pub use post::PostRecord;
pub use rank::{rank_by_reach, DEFAULT_TOP_K};
pub use request::{DigestRequest, DIGEST_SYSTEM_PROMPT, POST_SEPARATOR};
pub use traits::{PostSource, Summarizer};
pub use window::{filter_window, TimeWindow};
