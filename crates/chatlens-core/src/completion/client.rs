//! CompletionClient trait definition.

use chatlens_types::error::CompletionError;

/// Sampling parameters a client sends with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Trait for chat-completion backends.
///
/// `complete` sends one prompt as a single user-role message and yields the
/// first choice's content verbatim. Failures are reported as a tagged
/// [`CompletionError`]; deciding how to present them is the caller's job.
///
/// Implementations live in chatlens-infra (e.g., `ChatCompletionsClient`).
pub trait CompletionClient: Send + Sync {
    /// Human-readable backend name, used in tracing spans.
    fn name(&self) -> &str;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Temperature and token limit sent with every request.
    fn params(&self) -> RequestParams;

    /// Send a prompt and receive the reply text.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
