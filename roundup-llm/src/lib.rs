//! Provider-agnostic LLM integration for Roundup.
//!
//! This crate exposes a common [`traits::LlmClient`] interface, concrete
//! chat clients for OpenAI and Ollama, and [`summarizer::LlmSummarizer`], which
//! adapts any client to the [`roundup_core::Summarizer`] capability used by the
//! digest pipeline.
//!
//! # Examples
//! ```no_run
//! use roundup_core::Summarizer;
//! use roundup_llm::{openai::OpenAiClient, summarizer::LlmSummarizer, traits::GenerationOptions};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let client = OpenAiClient::new("sk-...".to_string(), "gpt-4o".to_string())?;
//! let summarizer = LlmSummarizer::new(Arc::new(client), GenerationOptions::default());
//! let digest = summarizer.summarize("Summarize.", "post one\n\n---\n\npost two").await?;
//! println!("{digest}");
//! # Ok(())
//! # }
//! ```
#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;
pub mod summarizer;
pub mod traits;

/// Default model recommendations for digest generation
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";
/// Sampling temperature used for digests unless configured otherwise.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
