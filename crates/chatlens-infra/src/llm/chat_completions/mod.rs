//! ChatCompletionsClient -- [`CompletionClient`] for OpenAI-compatible endpoints.
//!
//! Sends `POST {endpoint_base}/chat/completions` with bearer authentication and
//! a single user-role message, then returns the first choice's content
//! verbatim. Works with Groq, OpenAI, and anything else speaking that protocol.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, warn};

use chatlens_core::completion::client::{CompletionClient, RequestParams};
use chatlens_types::config::CompletionConfig;
use chatlens_types::error::CompletionError;

use self::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Longest prefix of an error-status body kept for display.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Shorten an upstream error body to at most [`MAX_ERROR_BODY_CHARS`] characters.
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", body[..cut].trim_end()),
        None => body.trim_end().to_string(),
    }
}

/// Chat-completions endpoint client.
///
/// Does NOT derive Debug; see the module docs.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl ChatCompletionsClient {
    /// Create a client from the `[completion]` configuration section.
    pub fn new(api_key: SecretString, config: &CompletionConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("chatlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CompletionError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.endpoint_base.trim_end_matches('/').to_string(),
            model: config.model_id.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else {
            CompletionError::Transport(e.to_string())
        }
    }
}

impl CompletionClient for ChatCompletionsClient {
    fn name(&self) -> &str {
        "chat_completions"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn params(&self) -> RequestParams {
        RequestParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = self.url("/chat/completions");
        let body = self.build_request(prompt);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let err = self.map_send_error(e);
                warn!(error = %err, url = %url, "Completion request failed");
                err
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let err = self.map_send_error(e);
            warn!(error = %err, "Failed to read completion response body");
            err
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Completion endpoint returned an error status");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "Completion response did not match the expected shape");
            CompletionError::Unexpected(format!("failed to parse response: {e}"))
        })?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            error!("Completion response contained no choices");
            return Err(CompletionError::Unexpected(
                "response contained no choices".to_string(),
            ));
        };

        let Some(content) = choice.message.content else {
            error!("First completion choice had no content");
            return Err(CompletionError::Unexpected(
                "first choice has no message content".to_string(),
            ));
        };

        debug!(chars = content.chars().count(), "Completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;

    async fn spawn_upstream(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn make_client(base_url: &str) -> ChatCompletionsClient {
        let config = CompletionConfig {
            endpoint_base: base_url.to_string(),
            ..Default::default()
        };
        ChatCompletionsClient::new(SecretString::from("test-key-not-real"), &config).unwrap()
    }

    /// Echoes the auth header and request fields back as the reply content.
    async fn echo_handler(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let content = format!(
            "{auth}|{}|{}|{}|{}|{}",
            body["model"].as_str().unwrap_or_default(),
            body["temperature"],
            body["max_tokens"],
            body["messages"][0]["role"].as_str().unwrap_or_default(),
            body["messages"][0]["content"].as_str().unwrap_or_default(),
        );
        Json(json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
    }

    #[tokio::test]
    async fn test_complete_success() {
        let router = axum::Router::new().route("/chat/completions", post(echo_handler));
        let base = spawn_upstream(router).await;
        let client = make_client(&format!("{base}/"));

        let reply = client.complete("what is trending?").await.unwrap();
        assert_eq!(
            reply,
            "Bearer test-key-not-real|llama-3.1-8b-instant|0.1|1000|user|what is trending?"
        );
    }

    #[test]
    fn test_params_follow_config() {
        let config = CompletionConfig {
            temperature: 0.7,
            max_tokens: 256,
            ..Default::default()
        };
        let client = ChatCompletionsClient::new(SecretString::from("k"), &config).unwrap();
        assert_eq!(
            client.params(),
            RequestParams {
                temperature: 0.7,
                max_tokens: 256
            }
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport() {
        let router = axum::Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base = spawn_upstream(router).await;

        let err = make_client(&base).complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Status { status: 401, .. }));
        assert!(err.is_transport());
        assert!(err.display_text().contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_error_status_body_is_truncated() {
        let page = format!("<html><body>{}</body></html>", "Bad Gateway ".repeat(100));
        let router = axum::Router::new().route(
            "/chat/completions",
            post(move || {
                let page = page.clone();
                async move { (StatusCode::BAD_GATEWAY, page) }
            }),
        );
        let base = spawn_upstream(router).await;

        let err = make_client(&base).complete("hi").await.unwrap_err();
        let CompletionError::Status { status, body } = &err else {
            panic!("expected status error, got {err:?}");
        };
        assert_eq!(*status, 502);
        assert!(body.starts_with("<html><body>Bad Gateway"));
        assert!(body.ends_with("..."));
        assert!(body.chars().count() <= MAX_ERROR_BODY_CHARS + 3);
    }

    #[test]
    fn test_truncate_body_short_and_multibyte() {
        assert_eq!(truncate_body("invalid api key\n"), "invalid api key");
        let long = "é".repeat(MAX_ERROR_BODY_CHARS + 10);
        let cut = truncate_body(&long);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 3);
    }

    #[tokio::test]
    async fn test_malformed_body_is_unexpected() {
        let router = axum::Router::new()
            .route("/chat/completions", post(|| async { "not json at all" }));
        let base = spawn_upstream(router).await;

        let err = make_client(&base).complete("hi").await.unwrap_err();
        assert!(!err.is_transport());
        assert!(err.display_text().starts_with("An unexpected error occurred"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_unexpected() {
        let router = axum::Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base = spawn_upstream(router).await;

        let err = make_client(&base).complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Unexpected(ref m) if m.contains("no choices")));
    }

    #[tokio::test]
    async fn test_null_content_is_unexpected() {
        let router = axum::Router::new().route(
            "/chat/completions",
            post(|| async {
                Json(json!({"choices": [{"message": {"role": "assistant", "content": null}}]}))
            }),
        );
        let base = spawn_upstream(router).await;

        let err = make_client(&base).complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        // Accepts connections and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client =
            make_client(&format!("http://{addr}")).with_timeout(Duration::from_millis(200));
        let err = client.complete("hi").await.unwrap_err();

        assert!(matches!(err, CompletionError::Timeout(_)));
        assert!(err.display_text().contains("Error communicating with AI service"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = make_client(&format!("http://{addr}"))
            .complete("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
        assert!(err.display_text().starts_with("Error communicating with AI service: "));
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let client = make_client("https://api.groq.com/openai/v1/");
        assert_eq!(
            client.url("/chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(client.name(), "chat_completions");
        assert_eq!(client.model(), "llama-3.1-8b-instant");
    }
}
