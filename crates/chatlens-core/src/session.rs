//! Per-request chat orchestration.
//!
//! `SessionOrchestrator` drives one request through a fixed sequence:
//!
//! ```text
//! received -> user message stored -> [analysis] -> prompt built
//!          -> completion requested -> AI message stored -> outcome
//! ```
//!
//! No step aborts the sequence: completion failures are downgraded into the
//! AI message's text. There is no retry and no rollback.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use chatlens_types::analysis::AnalysisSnapshot;
use chatlens_types::message::Message;

use crate::analysis::SocialMediaAnalyzer;
use crate::completion::box_client::BoxCompletionClient;
use crate::conversation::ConversationStore;
use crate::prompt::PromptBuilder;

/// Result of one chat request, serialized as the `/api/chat` response body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    /// The stored AI message.
    pub response: Message,
    /// Whether the front end should open its visualization panel.
    pub should_show_viz: bool,
    /// Analysis payload; `null` when not requested.
    pub analysis_data: Option<AnalysisSnapshot>,
}

/// Ties the prompt builder, completion client, analyzer and conversation store
/// together for each incoming message.
pub struct SessionOrchestrator {
    client: BoxCompletionClient,
    store: Arc<ConversationStore>,
    prompt: PromptBuilder,
    analyzer: SocialMediaAnalyzer,
}

impl SessionOrchestrator {
    pub fn new(
        client: BoxCompletionClient,
        store: Arc<ConversationStore>,
        prompt: PromptBuilder,
        analyzer: SocialMediaAnalyzer,
    ) -> Self {
        Self {
            client,
            store,
            prompt,
            analyzer,
        }
    }

    /// Access the conversation store.
    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Handle one user message end to end.
    pub async fn handle_message(&self, text: &str) -> ChatOutcome {
        self.store.append(Message::from_user(text)).await;

        let analysis_data = self.analyzer.analyze_if_requested(text);
        if analysis_data.is_some() {
            debug!("Analysis keywords matched");
        }

        let prompt = self.prompt.prompt_for(text);

        let reply = self.client.complete_or_degrade(&prompt.text).await;

        let response = self.store.append(Message::from_ai(reply)).await;

        info!(
            reply_chars = response.text.chars().count(),
            analysis = analysis_data.is_some(),
            "Chat turn complete"
        );

        ChatOutcome {
            response,
            should_show_viz: analysis_data.is_some(),
            analysis_data,
        }
    }
}
