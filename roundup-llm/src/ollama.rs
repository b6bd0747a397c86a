use crate::traits::{digest_messages, ChatMessage, GenerationOptions, LlmClient, LlmResponse};
use async_trait::async_trait;
use roundup_common::{Result, RoundupError};
use roundup_http::{HttpClient, HttpError, RequestOpts};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

const OLLAMA_CONNECTION_ERROR: &str = "No running Ollama server detected. Start it with: `ollama serve` (after installing). Install instructions: https://github.com/ollama/ollama";

/// Ollama client for local model inference.
///
/// Expects a running Ollama server with the model already pulled.
pub struct OllamaClient {
    client: HttpClient,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "ChatOptions::is_empty")]
    options: ChatOptions,
}

#[derive(Serialize, Default)]
struct ChatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl ChatOptions {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.num_predict.is_none()
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    message: Option<ChatMessage>,
    #[serde(default)]
    eval_count: Option<u32>,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: String) -> Result<Self> {
        let client = HttpClient::new(base_url.trim_end_matches('/'))
            .map_err(|e| RoundupError::Config(format!("ollama endpoint: {e}")))?
            .with_timeout(Duration::from_secs(300))
            .with_retries(0);
        Ok(Self { client, model })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: GenerationOptions,
    ) -> Result<LlmResponse> {
        let req = ChatRequest {
            model: &self.model,
            messages: digest_messages(system_prompt, user_prompt),
            stream: false,
            options: ChatOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        tracing::debug!(model = %self.model, prompt_len = user_prompt.len(), "ollama.chat");

        let resp: ChatResponse = self
            .client
            .post_json("api/chat", &req, RequestOpts::default())
            .await
            .map_err(|e| match e {
                HttpError::Decode(..) => RoundupError::MalformedResponse(e.to_string()),
                HttpError::Network(_) => RoundupError::Provider(OLLAMA_CONNECTION_ERROR.to_string()),
                other => RoundupError::Provider(format!("ollama: {other}")),
            })?;

        let text = resp
            .message
            .map(|m| m.content)
            .ok_or_else(|| RoundupError::MalformedResponse("chat response has no message".into()))?;

        Ok(LlmResponse {
            text,
            model: resp.model.or_else(|| Some(self.model.clone())),
            tokens_used: resp.eval_count,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
