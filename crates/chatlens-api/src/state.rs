//! Application state wiring the pipeline together.
//!
//! AppState owns the conversation store and the orchestrator built on top of
//! it. The store is created once per process and shared by handle; nothing
//! lives in module-level globals.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use chatlens_core::analysis::SocialMediaAnalyzer;
use chatlens_core::completion::box_client::BoxCompletionClient;
use chatlens_core::conversation::ConversationStore;
use chatlens_core::prompt::PromptBuilder;
use chatlens_core::session::SessionOrchestrator;
use chatlens_infra::config::resolve_api_key;
use chatlens_infra::llm::chat_completions::ChatCompletionsClient;
use chatlens_types::config::ChatlensConfig;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SessionOrchestrator>,
    pub store: Arc<ConversationStore>,
    pub web_dir: PathBuf,
}

impl AppState {
    /// Build the state with the real completion endpoint client.
    ///
    /// A missing credential is not fatal: the endpoint will reject the call
    /// and the rejection shows up as the reply text.
    pub fn init(config: &ChatlensConfig) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(&config.completion, |key| std::env::var(key).ok())
            .unwrap_or_else(|| {
                tracing::warn!(
                    env = %config.completion.api_key_env,
                    "No completion API key set; requests will be rejected by the endpoint"
                );
                SecretString::from("")
            });

        let client = ChatCompletionsClient::new(api_key, &config.completion)?;

        tracing::info!(
            endpoint = %config.completion.endpoint_base,
            model = %config.completion.model_id,
            timeout_secs = config.completion.timeout_secs,
            "Completion client ready"
        );

        Ok(Self::with_client(config, BoxCompletionClient::new(client)))
    }

    /// Build the state around an already constructed completion client.
    pub fn with_client(config: &ChatlensConfig, client: BoxCompletionClient) -> Self {
        let store = Arc::new(ConversationStore::new());

        let orchestrator = SessionOrchestrator::new(
            client,
            Arc::clone(&store),
            PromptBuilder::from_config(&config.prompt),
            SocialMediaAnalyzer::from_config(&config.analysis),
        );

        Self {
            orchestrator: Arc::new(orchestrator),
            store,
            web_dir: PathBuf::from(&config.server.web_dir),
        }
    }
}
