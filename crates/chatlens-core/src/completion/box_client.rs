//! BoxCompletionClient -- object-safe dynamic dispatch wrapper for CompletionClient.
//!
//! 1. `CompletionClientDyn` is an object-safe mirror with a boxed future
//! 2. Blanket-impl `CompletionClientDyn` for all `T: CompletionClient`
//! 3. `BoxCompletionClient` wraps `Box<dyn CompletionClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use tracing::{Instrument, info_span};

use chatlens_types::error::CompletionError;

use super::client::{CompletionClient, RequestParams};

/// Object-safe version of [`CompletionClient`] with a boxed future.
pub trait CompletionClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn params(&self) -> RequestParams;

    fn complete_boxed<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>>;
}

impl<T: CompletionClient> CompletionClientDyn for T {
    fn name(&self) -> &str {
        CompletionClient::name(self)
    }

    fn model(&self) -> &str {
        CompletionClient::model(self)
    }

    fn params(&self) -> RequestParams {
        CompletionClient::params(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>> {
        Box::pin(self.complete(prompt))
    }
}

/// Type-erased completion client.
///
/// Lets the application state hold the real HTTP client in production and a
/// canned client in tests without making every service generic.
pub struct BoxCompletionClient {
    inner: Box<dyn CompletionClientDyn + Send + Sync>,
}

impl BoxCompletionClient {
    /// Wrap a concrete `CompletionClient` in a type-erased box.
    pub fn new<T: CompletionClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }

    pub fn params(&self) -> RequestParams {
        self.inner.params()
    }

    /// Send a prompt and receive the reply or a tagged failure.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let params = self.inner.params();
        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.inner.name(),
            gen_ai.request.model = %self.inner.model(),
            gen_ai.request.max_tokens = params.max_tokens,
            gen_ai.request.temperature = params.temperature,
        );

        self.inner.complete_boxed(prompt).instrument(span).await
    }

    /// Send a prompt and always come back with displayable text.
    ///
    /// Failures are rendered through [`CompletionError::display_text`] so the
    /// caller can show them as an ordinary reply.
    pub async fn complete_or_degrade(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(text) => text,
            Err(e) => e.display_text(),
        }
    }
}
