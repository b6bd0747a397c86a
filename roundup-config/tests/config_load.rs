use roundup_common::observability::LogFormat;
use roundup_config::{LlmConfig, RoundupConfigLoader};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

const FULL_YAML: &str = r#"
version: "1"
twitter:
  bearer_token: "${TEST_TWITTER_BEARER}"
  max_results: 50
llm:
  provider: openai
  model: "gpt-4o-mini"
  auth_token: "${TEST_OPENAI_KEY}"
  temperature: 0.2
  max_tokens: 1024
  timeout_secs: 90
digest:
  top_k: 25
  lookback_days: 3
logging:
  format: json
  filter: "roundup=debug"
"#;

#[test]
#[serial]
fn loads_full_file_with_env_secrets() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "roundup.yaml", FULL_YAML);

    temp_env::with_vars(
        [
            ("TEST_TWITTER_BEARER", Some("tw-secret")),
            ("TEST_OPENAI_KEY", Some("sk-secret")),
        ],
        || {
            let config = RoundupConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load config");

            assert_eq!(config.twitter.bearer_token, "tw-secret");
            assert_eq!(config.twitter.max_results, Some(50));
            assert_eq!(config.twitter.base_url, None);
            assert_eq!(config.digest.top_k, 25);
            assert_eq!(config.digest.lookback_days, 3);
            assert_eq!(config.digest.timeout_secs, 120);
            assert_eq!(config.logging.format, LogFormat::Json);
            assert_eq!(config.logging.filter, "roundup=debug");
            match &config.llm {
                LlmConfig::Openai { auth_token, .. } => assert_eq!(auth_token, "sk-secret"),
                other => panic!("expected openai, got {other:?}"),
            }
            assert!((config.llm.temperature() - 0.2).abs() < f32::EPSILON);
            assert_eq!(config.llm.max_tokens(), Some(1024));
        },
    );
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "roundup.yaml", FULL_YAML);

    temp_env::with_vars(
        [
            ("TEST_TWITTER_BEARER", Some("tw")),
            ("TEST_OPENAI_KEY", Some("sk")),
            ("ROUNDUP__DIGEST__TOP_K", Some("7")),
        ],
        || {
            let config = RoundupConfigLoader::new().with_file(&p).load().unwrap();
            assert_eq!(config.digest.top_k, 7);
        },
    );
}

#[test]
#[serial]
fn missing_optional_file_is_fine() {
    let tmp = TempDir::new().unwrap();
    let config = RoundupConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .with_yaml_str("twitter:\n  bearer_token: t\nllm:\n  provider: ollama\n")
        .load()
        .unwrap();

    assert!(matches!(config.llm, LlmConfig::Ollama { .. }));
    assert_eq!(config.digest.lookback_days, 7);
}

#[test]
#[serial]
fn missing_required_file_fails() {
    let tmp = TempDir::new().unwrap();
    let result = RoundupConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn missing_llm_section_fails() {
    let result = RoundupConfigLoader::new()
        .with_yaml_str("twitter:\n  bearer_token: t\n")
        .load();
    assert!(result.is_err());
}
