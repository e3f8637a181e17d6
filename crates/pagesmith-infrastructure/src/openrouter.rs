//! OpenRouter completion client.
//!
//! Sends JSON-mode chat completion requests to OpenRouter and returns the
//! content string of the first choice. No retries happen here; a failed
//! call surfaces as `ChatRequestFailed` and the caller decides what to do.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use pagesmith_core::pipeline::{ChatMessage, CompletionClient, StageConfig};
use pagesmith_core::{PagesmithError, Result};

const BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Per-stage request timeout. The upstream default is effectively
/// unbounded, which would pin a chat request on a stalled provider.
const STAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the OpenRouter chat completions endpoint.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterClient {
    /// Creates a client using the provided bearer credential.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(STAGE_TIMEOUT)
            .build()
            .map_err(|err| PagesmithError::config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Overrides the endpoint URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete_json(&self, config: &StageConfig, messages: &[ChatMessage]) -> Result<String> {
        let request = CompletionRequest {
            model: &config.model,
            messages,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(model = %config.model, messages = messages.len(), "sending completion request");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                PagesmithError::chat_request_failed(format!("OpenRouter request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(PagesmithError::chat_request_failed(format!(
                "OpenRouter returned {status}: {}",
                error_message(&body)
            )));
        }

        let payload: Value = response.json().await.map_err(|err| {
            PagesmithError::chat_request_failed(format!("failed to read OpenRouter response: {err}"))
        })?;

        extract_content(&payload).ok_or_else(|| {
            PagesmithError::chat_request_failed(
                "OpenRouter response carried no message content".to_string(),
            )
        })
    }
}

/// Pulls `.choices[0].message.content` out of a completion payload.
fn extract_content(payload: &Value) -> Option<String> {
    payload
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|content| content.to_string())
}

/// Prefers the provider's structured error message over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_content_from_completion() {
        let payload = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "{\"needsImages\":false}"}}
            ]
        });
        assert_eq!(
            extract_content(&payload).as_deref(),
            Some("{\"needsImages\":false}")
        );
    }

    #[test]
    fn test_extract_content_missing_pieces() {
        assert_eq!(extract_content(&json!({})), None);
        assert_eq!(extract_content(&json!({"choices": []})), None);
        assert_eq!(
            extract_content(&json!({"choices": [{"message": {}}]})),
            None
        );
        // Non-string content (e.g. a content-parts array) is not accepted.
        assert_eq!(
            extract_content(&json!({"choices": [{"message": {"content": [1, 2]}}]})),
            None
        );
    }

    #[test]
    fn test_error_message_prefers_structured_error() {
        let body = r#"{"error":{"message":"model not found","code":404}}"#;
        assert_eq!(error_message(body), "model not found");
        assert_eq!(error_message("plain text failure"), "plain text failure");
    }

    #[test]
    fn test_request_serializes_json_object_format() {
        let request = CompletionRequest {
            model: "openai/gpt-4o",
            messages: &[ChatMessage::user("hello")],
            max_tokens: 100,
            temperature: 0.7,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
