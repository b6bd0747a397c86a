use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

impl HttpError {
    /// HTTP status for API errors, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human message out of the error envelopes used by the X and OpenAI APIs.
pub(crate) fn extract_error_message(body: &[u8]) -> String {
    // OpenAI: {"error":{"message":"..."}}
    #[derive(Deserialize)]
    struct OpenAiEnvelope {
        error: OpenAiDetail,
    }
    #[derive(Deserialize)]
    struct OpenAiDetail {
        message: String,
    }

    // X: {"errors":[{"message":"..."}]} or problem JSON {"title":"...","detail":"..."}
    #[derive(Deserialize)]
    struct XErrors {
        errors: Vec<XProblem>,
    }
    #[derive(Deserialize, Default)]
    struct XProblem {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        title: String,
    }

    // Ollama and friends: {"error":"..."}
    #[derive(Deserialize)]
    struct Plain {
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<OpenAiEnvelope>(body) {
        return env.error.message;
    }
    if let Ok(plain) = serde_json::from_slice::<Plain>(body) {
        return plain.error;
    }
    let problems = serde_json::from_slice::<XErrors>(body)
        .map(|e| e.errors)
        .or_else(|_| serde_json::from_slice::<XProblem>(body).map(|p| vec![p]))
        .unwrap_or_default();
    problems
        .into_iter()
        .flat_map(|p| [p.message, p.detail, p.title])
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| snip_body(body))
}

pub(crate) fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_openai_envelope() {
        let body = br#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#;
        assert_eq!(extract_error_message(body), "You exceeded your current quota");
    }

    #[test]
    fn reads_x_errors_array() {
        let body = br#"{"errors":[{"title":"Not Found Error","detail":"Could not find list with id: [1]."}]}"#;
        assert_eq!(extract_error_message(body), "Could not find list with id: [1].");
    }

    #[test]
    fn reads_x_problem_json() {
        let body = br#"{"title":"Unauthorized","type":"about:blank","status":401,"detail":""}"#;
        assert_eq!(extract_error_message(body), "Unauthorized");
    }

    #[test]
    fn reads_plain_error_string() {
        assert_eq!(extract_error_message(br#"{"error":"model not found"}"#), "model not found");
    }

    #[test]
    fn falls_back_to_snippet() {
        let long = "x".repeat(800);
        let msg = extract_error_message(long.as_bytes());
        assert!(msg.ends_with("..."));
        assert_eq!(msg.len(), 503);
    }
}
