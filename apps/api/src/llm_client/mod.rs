//! LLM Client: the single point of entry for all chat-completion calls.
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint. One attempt per
//! call: a timeout, transport failure, or non-2xx status is returned as an error
//! and never retried.
//!
//! Model: gpt-4o-mini, fixed in code.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for every analysis.
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no choices")]
    EmptyChoices,
}

/// Anything that can answer a system + user prompt pair with JSON-mode output.
///
/// The analysis endpoint only sees this trait, so tests swap in a mock provider.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the first completion's message content. `None` when the model
    /// produced a message without content.
    async fn complete_json(&self, system: &str, user: &str) -> Result<Option<String>, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Chat-completion client. Cheap to clone; holds a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Makes a raw JSON-mode call, returning the full response object.
    pub async fn call(&self, system: &str, user: &str) -> Result<ChatCompletionResponse, LlmError> {
        let request_body = build_request(system, user);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl ChatProvider for LlmClient {
    async fn complete_json(&self, system: &str, user: &str) -> Result<Option<String>, LlmError> {
        let completion = self.call(system, user).await?;
        let first = completion
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyChoices)?;
        Ok(first.message.content)
    }
}

fn build_request<'a>(system: &'a str, user: &'a str) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ],
        response_format: ResponseFormat {
            format_type: "json_object",
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(|s| s.trim())
                .unwrap_or(stripped)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves a fixed status and body on `/v1/chat/completions` and returns the base URL.
    async fn spawn_stub(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(req): Json<Value>| {
                let body = body.clone();
                async move {
                    assert_eq!(req["model"], MODEL);
                    assert_eq!(req["response_format"]["type"], "json_object");
                    (status, Json(body))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn client_for(base_url: String) -> LlmClient {
        LlmClient::new("sk-test".to_string(), base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(build_request("sys", "resume")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "resume" }
                ],
                "response_format": { "type": "json_object" }
            })
        );
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[tokio::test]
    async fn test_complete_json_returns_first_choice_content() {
        let base = spawn_stub(
            StatusCode::OK,
            json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "{\"score\":72}" } },
                    { "message": { "role": "assistant", "content": "ignored" } }
                ],
                "usage": { "prompt_tokens": 120, "completion_tokens": 40 }
            }),
        )
        .await;

        let content = client_for(base).complete_json("sys", "user").await.unwrap();
        assert_eq!(content.as_deref(), Some("{\"score\":72}"));
    }

    #[tokio::test]
    async fn test_null_content_is_none() {
        let base = spawn_stub(
            StatusCode::OK,
            json!({ "choices": [ { "message": { "content": null } } ] }),
        )
        .await;

        let content = client_for(base).complete_json("sys", "user").await.unwrap();
        assert!(content.is_none());
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let base = spawn_stub(StatusCode::OK, json!({ "choices": [] })).await;

        let err = client_for(base).complete_json("sys", "user").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyChoices));
    }

    #[tokio::test]
    async fn test_api_error_message_extracted() {
        let base = spawn_stub(
            StatusCode::UNAUTHORIZED,
            json!({ "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" } }),
        )
        .await;

        let err = client_for(base).complete_json("sys", "user").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_without_envelope_kept_raw() {
        let base = spawn_stub(StatusCode::BAD_GATEWAY, json!({ "detail": "upstream down" })).await;

        let err = client_for(base).complete_json("sys", "user").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("upstream down"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{addr}/v1"))
            .complete_json("sys", "user")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
