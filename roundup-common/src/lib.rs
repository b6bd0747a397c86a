//! Common types and utilities shared across Roundup crates.
//!
//! This crate holds the error type used by the adapter crates (HTTP data
//! sources, LLM providers, configuration wiring) and the logging initializer.
//! It is intentionally small so every crate can depend on it.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`RoundupError`] and [`Result`]: Shared error handling for adapters
//!
//! The ranking pipeline itself lives in `roundup-core` and carries its own
//! error taxonomy; adapter errors reach it boxed.
//!
//! # Examples
//!
//! ```rust
//! use roundup_common::RoundupError;
//!
//! let err = RoundupError::MalformedResponse("no choices".into());
//! assert_eq!(err.to_string(), "Malformed response: no choices");
//! ```
pub mod observability;

/// Error types used by the Roundup adapter crates.
#[derive(thiserror::Error, Debug)]
pub enum RoundupError {
    /// A remote provider (X API, LLM endpoint) rejected or failed a request.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A provider answered, but not with anything usable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`RoundupError`].
pub type Result<T> = std::result::Result<T, RoundupError>;
