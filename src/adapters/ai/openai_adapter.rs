//! OpenAI-compatible chat-completions adapter.
//!
//! Works against OpenRouter, OpenAI, Azure OpenAI or a local Ollama endpoint.
//! Implements `RewritingPort`: one POST per call, no retries, every failure
//! mapped to an `LlmError` kind.

use crate::domain::LlmError;
use crate::ports::RewritingPort;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Completion budget per call.
pub const DEFAULT_MAX_TOKENS: u32 = 400;

/// OpenAI-compatible rewriting adapter.
///
/// Credential and endpoint are explicit constructor inputs; nothing is read
/// from process globals.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    max_tokens: u32,
}

impl OpenAiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - Chat completions endpoint (e.g., "https://openrouter.ai/api/v1/chat/completions")
    /// * `api_key` - Bearer credential (can be empty for local Ollama)
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Apply a whole-request timeout. Keeps the default client if the builder fails.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => self.client = client,
            Err(e) => warn!(error = %e, "could not build HTTP client with timeout, using default"),
        }
        self
    }

    /// Map a provider response (status + raw body) to completion text or an error kind.
    fn parse_completion(status: StatusCode, body: &str) -> Result<String, LlmError> {
        let parsed = serde_json::from_str::<ChatResponse>(body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| {
                    format!("HTTP {}: {}", status, body.chars().take(200).collect::<String>())
                });
            return Err(LlmError::ProviderError(message));
        }

        let response = parsed.map_err(|e| {
            LlmError::MalformedResponse(format!("Failed to parse response body: {}", e))
        })?;

        if let Some(error) = response.error {
            return Err(LlmError::ProviderError(
                error
                    .message
                    .unwrap_or_else(|| "Unknown API error".to_string()),
            ));
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| LlmError::MalformedResponse("No completion in response".to_string()))
    }
}

/// Chat completions request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response envelope; either `choices` or `error` is expected.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait::async_trait]
impl RewritingPort for OpenAiAdapter {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LlmError> {
        debug!(model, prompt_len = prompt.len(), "sending prompt to rewriting service");

        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::TransportFailure(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::TransportFailure(format!("Failed to read response body: {}", e)))?;

        let result = Self::parse_completion(status, &body);
        match &result {
            Ok(text) => debug!(model, completion_len = text.len(), "received completion"),
            Err(e) => warn!(model, status = %status, error_kind = e.kind(), error = %e, "rewriting call failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_success() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Take one pill daily.\n"}}]}"#;
        assert_eq!(
            OpenAiAdapter::parse_completion(StatusCode::OK, body).unwrap(),
            "Take one pill daily."
        );
    }

    #[test]
    fn test_parse_completion_error_status_uses_payload_message() {
        let body = r#"{"error":{"message":"Invalid API key","code":401}}"#;
        assert_eq!(
            OpenAiAdapter::parse_completion(StatusCode::UNAUTHORIZED, body),
            Err(LlmError::ProviderError("Invalid API key".to_string()))
        );
    }

    #[test]
    fn test_parse_completion_error_status_without_payload() {
        let err = OpenAiAdapter::parse_completion(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .unwrap_err();
        match err {
            LlmError::ProviderError(msg) => {
                assert!(msg.contains("502"));
                assert!(msg.contains("bad gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_completion_error_payload_on_success_status() {
        let body = r#"{"error":{}}"#;
        assert_eq!(
            OpenAiAdapter::parse_completion(StatusCode::OK, body),
            Err(LlmError::ProviderError("Unknown API error".to_string()))
        );
    }

    #[test]
    fn test_parse_completion_malformed() {
        assert!(matches!(
            OpenAiAdapter::parse_completion(StatusCode::OK, "not json"),
            Err(LlmError::MalformedResponse(_))
        ));
        assert!(matches!(
            OpenAiAdapter::parse_completion(StatusCode::OK, r#"{"choices":[]}"#),
            Err(LlmError::MalformedResponse(_))
        ));
        assert!(matches!(
            OpenAiAdapter::parse_completion(StatusCode::OK, r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: "openai/gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            max_tokens: DEFAULT_MAX_TOKENS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "openai/gpt-4o-mini",
                "messages": [{"role": "user", "content": "hello"}],
                "max_tokens": 400
            })
        );
    }
}
