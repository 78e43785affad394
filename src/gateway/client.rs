//! HTTP client for the remote QA service
//!
//! A single ask is one `POST {"question": ...}` with a fixed timeout and
//! no retries. Every outcome is normalized into `Result<String,
//! GatewayFailure>`; nothing is thrown past this boundary.

use super::GatewayFailure;
use crate::config::GatewayConfig;
use crate::{StudyError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Serialize)]
struct QuestionPayload<'a> {
    question: &'a str,
}

pub struct QaClient {
    http: HttpClient,
    endpoint: String,
}

impl QaClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StudyError::GatewayError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Send one question to the QA service and normalize the response.
    ///
    /// Exactly one attempt is made; the caller decides whether to surface
    /// an error message to the user.
    pub async fn ask(&self, question: &str) -> std::result::Result<String, GatewayFailure> {
        debug!("Asking QA service ({} chars)", question.len());

        let response = self
            .http
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(&QuestionPayload { question })
            .send()
            .await
            .map_err(GatewayFailure::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayFailure::Server(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(GatewayFailure::from_transport)?;

        Ok(extract_answer(&body))
    }
}

impl GatewayFailure {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayFailure::Timeout
        } else {
            GatewayFailure::Network(e.to_string())
        }
    }
}

/// Extract the answer text from a response body of unguaranteed shape.
///
/// The upstream service does not commit to a schema, so the body is probed
/// in a fixed order: a `text` field, then a `response` field, then a full
/// serialization of the body. Empty strings and non-string values fall
/// through to the next candidate; non-JSON bodies are taken verbatim.
/// This order is observable to users and must not change.
pub fn extract_answer(body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return body.to_string(),
    };

    for field in ["text", "response"] {
        if let Some(answer) = value.get(field).and_then(Value::as_str) {
            if !answer.is_empty() {
                return answer.to_string();
            }
        }
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_wins_over_response() {
        let body = r#"{"text":"A","response":"B"}"#;
        assert_eq!(extract_answer(body), "A");
    }

    #[test]
    fn test_response_field_used_when_text_absent() {
        let body = r#"{"response":"B"}"#;
        assert_eq!(extract_answer(body), "B");
    }

    #[test]
    fn test_empty_object_serializes() {
        assert_eq!(extract_answer("{}"), "{}");
    }

    #[test]
    fn test_empty_text_falls_through() {
        // Upstream treats empty strings as absent
        let body = r#"{"text":"","response":"B"}"#;
        assert_eq!(extract_answer(body), "B");
    }

    #[test]
    fn test_non_string_fields_fall_through() {
        let body = r#"{"text":42,"response":{"nested":true}}"#;
        let answer = extract_answer(body);
        assert!(answer.contains("42"));
        assert!(answer.contains("nested"));
    }

    #[test]
    fn test_non_json_body_taken_verbatim() {
        assert_eq!(extract_answer("plain answer"), "plain answer");
    }

    #[test]
    fn test_client_construction() {
        let config = GatewayConfig::default();
        assert!(QaClient::new(&config).is_ok());
    }
}
