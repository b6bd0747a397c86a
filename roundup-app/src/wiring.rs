use anyhow::{Context, Result, bail};
use roundup_config::{LlmConfig, RoundupConfig, TwitterConfig};
use roundup_core::{DigestError, DigestPipeline};
use roundup_llm::{
    ollama::OllamaClient,
    openai::OpenAiClient,
    summarizer::LlmSummarizer,
    traits::{GenerationOptions, LlmClient},
};
use roundup_social::twitter::TwitterApi;
use roundup_tui::DigestDeps;
use std::{sync::Arc, time::Duration};
use tracing::info;

/// Build the data source, summarizer and pipeline described by `cfg`.
pub fn build_deps(cfg: &RoundupConfig) -> Result<DigestDeps> {
    let source = build_twitter(&cfg.twitter)?;
    let client = build_llm_client(&cfg.llm)?;
    let options = GenerationOptions {
        temperature: Some(cfg.llm.temperature()),
        max_tokens: cfg.llm.max_tokens(),
    };
    let summarizer = LlmSummarizer::new(client, options);
    let pipeline = build_pipeline(cfg.digest.top_k, cfg.digest.timeout_secs)?;

    info!(
        model = summarizer.model_name(),
        top_k = pipeline.top_k(),
        timeout_secs = cfg.digest.timeout_secs,
        "digest pipeline wired"
    );

    Ok(DigestDeps {
        source: Arc::new(source),
        summarizer: Arc::new(summarizer),
        pipeline,
    })
}

pub fn build_pipeline(top_k: usize, timeout_secs: u64) -> Result<DigestPipeline> {
    if timeout_secs == 0 {
        return Err(DigestError::InvalidConfig(
            "summarize timeout must be at least one second".into(),
        ))
        .context("invalid digest.timeout_secs");
    }
    let pipeline = DigestPipeline::new(top_k).context("invalid digest.top_k")?;
    Ok(pipeline.with_timeout(Duration::from_secs(timeout_secs)))
}

fn build_twitter(cfg: &TwitterConfig) -> Result<TwitterApi> {
    let token = require_secret("twitter.bearer_token", &cfg.bearer_token)?;
    let api = match &cfg.base_url {
        Some(base) => TwitterApi::with_base_url(base, token)?,
        None => TwitterApi::new(token)?,
    };
    Ok(match cfg.max_results {
        Some(n) => api.with_max_results(n),
        None => api,
    })
}

pub fn build_llm_client(cfg: &LlmConfig) -> Result<Arc<dyn LlmClient + Send + Sync>> {
    match cfg {
        LlmConfig::Openai {
            model,
            auth_token,
            endpoint,
            ..
        } => {
            let key = require_secret("llm.auth_token", auth_token)?;
            let mut client = OpenAiClient::with_base_url(endpoint, key, model.clone())?;
            if let Some(timeout) = cfg.timeout() {
                client = client.with_timeout(timeout);
            }
            Ok(Arc::new(client))
        }
        LlmConfig::Ollama {
            model, endpoint, ..
        } => {
            let mut client = OllamaClient::new(endpoint, model.clone())?;
            if let Some(timeout) = cfg.timeout() {
                client = client.with_timeout(timeout);
            }
            Ok(Arc::new(client))
        }
    }
}

/// Reject blank secrets and `${VAR}` references that did not resolve.
fn require_secret(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        bail!("{name} is empty");
    }
    if value.contains("${") {
        bail!("{name} references an unset environment variable: {value}");
    }
    Ok(value.to_string())
}
