//! Append-only, process-lifetime conversation store.
//!
//! Every message from every request lands in one shared ordered sequence.
//! There is no eviction and no per-session partitioning; `session_id` on a
//! message is carried but never used for lookup.

use tokio::sync::RwLock;
use tracing::debug;

use chatlens_types::message::Message;

/// Shared ordered sequence of chat messages.
///
/// Appends take the write lock, so concurrent requests interleave in arrival
/// order. Within a single request, awaiting one append before issuing the
/// next keeps that request's messages in order.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: RwLock<Vec<Message>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and hand it back for chaining.
    pub async fn append(&self, message: Message) -> Message {
        let mut messages = self.messages.write().await;
        messages.push(message.clone());
        debug!(
            position = messages.len() - 1,
            sender = %message.sender,
            "Stored message"
        );
        message
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    /// Owned copy of the whole sequence in insertion order.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }
}
