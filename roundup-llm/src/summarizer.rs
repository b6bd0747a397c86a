use crate::traits::{GenerationOptions, LlmClient};
use async_trait::async_trait;
use roundup_common::RoundupError;
use roundup_core::{Summarizer, SummarizerFailure};
use std::sync::Arc;

/// Adapts an [`LlmClient`] to the pipeline's [`Summarizer`] capability.
pub struct LlmSummarizer {
    client: Arc<dyn LlmClient + Send + Sync>,
    options: GenerationOptions,
}

impl LlmSummarizer {
    pub fn new(client: Arc<dyn LlmClient + Send + Sync>, options: GenerationOptions) -> Self {
        Self { client, options }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(
        &self,
        system_prompt: &str,
        payload: &str,
    ) -> Result<String, SummarizerFailure> {
        let response = self
            .client
            .chat(system_prompt, payload, self.options)
            .await?;

        if response.text.trim().is_empty() {
            return Err(RoundupError::MalformedResponse(format!(
                "{} returned an empty completion",
                self.client.model_name()
            ))
            .into());
        }

        tracing::info!(
            model = response.model.as_deref().unwrap_or(self.client.model_name()),
            payload_len = payload.len(),
            tokens_used = ?response.tokens_used,
            "llm.summarize.done"
        );
        Ok(response.text)
    }
}
