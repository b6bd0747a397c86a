//! Minimal JSON HTTP client with safe logging, bounded retries, and bearer auth.
//!
//! - Request options: [`Auth`], query params, timeout, retries
//! - Redacts sensitive query params and never logs secret values
//! - Retries 429/5xx with exponential backoff and `Retry-After` support, but
//!   only when the caller grants a retry budget
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), roundup_http::HttpError> {
//! let client = roundup_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", roundup_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Security: `Auth::Bearer` values are sanitized before use, and logs only
//! ever include the auth kind (bearer/none), not the secret.

mod auth;
mod client;
mod error;

pub use auth::Auth;
pub use client::{HttpClient, RequestOpts};
pub use error::HttpError;
