//! Loader for Roundup configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. YAML files and inline snippets, in the order they were added
//! 2. `ROUNDUP__`-prefixed environment variables (`ROUNDUP__DIGEST__TOP_K=25`)
//!
//! String values may reference environment variables as `$VAR` or `${VAR}`;
//! they are expanded (recursively, depth-capped) before the typed structs are
//! built, so secrets can stay out of the file:
//!
//! ```yaml
//! twitter:
//!   bearer_token: "${TWITTER_BEARER_TOKEN}"
//! llm:
//!   provider: openai
//!   model: gpt-4o
//!   auth_token: "${OPENAI_API_KEY}"
//! digest:
//!   top_k: 100
//!   lookback_days: 7
//! ```
use config::{Config, ConfigError, Environment, File, FileFormat};
use roundup_common::observability::LogFormat;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "ROUNDUP";

#[derive(Debug, Deserialize)]
pub struct RoundupConfig {
    #[serde(default)]
    pub version: Option<String>,
    pub twitter: TwitterConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct TwitterConfig {
    pub bearer_token: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum LlmConfig {
    Openai {
        #[serde(default = "default_openai_model")]
        model: String,
        auth_token: String,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_tokens: Option<u32>,
        #[serde(default = "default_openai_endpoint")]
        endpoint: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
    Ollama {
        #[serde(default = "default_ollama_model")]
        model: String,
        #[serde(default = "default_ollama_endpoint")]
        endpoint: String,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_tokens: Option<u32>,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl LlmConfig {
    pub fn model(&self) -> &str {
        match self {
            Self::Openai { model, .. } | Self::Ollama { model, .. } => model,
        }
    }

    /// Sampling temperature; 0.4 unless configured.
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Openai { temperature, .. } | Self::Ollama { temperature, .. } => {
                temperature.unwrap_or(DEFAULT_TEMPERATURE)
            }
        }
    }

    pub fn max_tokens(&self) -> Option<u32> {
        match self {
            Self::Openai { max_tokens, .. } | Self::Ollama { max_tokens, .. } => *max_tokens,
        }
    }

    /// Transport timeout for a single completion, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::Openai { timeout_secs, .. } | Self::Ollama { timeout_secs, .. } => {
                timeout_secs.map(Duration::from_secs)
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_digest_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            lookback_days: default_lookback_days(),
            timeout_secs: default_digest_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
            dir: None,
        }
    }
}

const DEFAULT_TEMPERATURE: f32 = 0.4;

fn default_openai_model() -> String {
    "gpt-4o".into()
}
fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".into()
}
fn default_ollama_model() -> String {
    "llama3.2:3b".into()
}
fn default_ollama_endpoint() -> String {
    "http://localhost:11434".into()
}
fn default_top_k() -> usize {
    100
}
fn default_lookback_days() -> u32 {
    7
}
fn default_digest_timeout_secs() -> u64 {
    120
}
fn default_log_filter() -> String {
    "info".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct RoundupConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for RoundupConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundupConfigLoader {
    /// Start with no file sources; environment overrides are applied at [`load`](Self::load).
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a required YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, so env-only setups still load.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use roundup_config::{LlmConfig, RoundupConfigLoader};
    ///
    /// let cfg = RoundupConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// twitter:
    ///   bearer_token: "example"
    /// llm:
    ///   provider: "ollama"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("test"));
    /// assert_eq!(cfg.digest.top_k, 100);
    /// assert!(matches!(cfg.llm, LlmConfig::Ollama { .. }));
    /// assert_eq!(cfg.llm.temperature(), 0.4);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use roundup_config::{LlmConfig, RoundupConfigLoader};
    ///
    /// unsafe { std::env::set_var("DOCTEST_OPENAI_KEY", "injected-from-env"); }
    ///
    /// let config = RoundupConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// twitter:
    ///   bearer_token: "tw"
    /// llm:
    ///   provider: "openai"
    ///   auth_token: "${DOCTEST_OPENAI_KEY}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// match &config.llm {
    ///     LlmConfig::Openai { model, auth_token, endpoint, .. } => {
    ///         assert_eq!(model, "gpt-4o");
    ///         assert_eq!(auth_token, "injected-from-env");
    ///         assert_eq!(endpoint, "https://api.openai.com/v1");
    ///     }
    ///     _ => panic!("expected OpenAI configuration"),
    /// }
    ///
    /// unsafe { std::env::remove_var("DOCTEST_OPENAI_KEY"); }
    /// ```
    pub fn load(self) -> Result<RoundupConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
