//! Social network data sources used by Roundup.
//!
//! Currently only X/Twitter lists are supported. The [`twitter::TwitterApi`]
//! client implements [`roundup_core::PostSource`], so the pipeline can be fed
//! from a live list or from any stub in tests.
pub mod twitter;
