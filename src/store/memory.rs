//! In-memory implementation of `ConversationStore`.
//!
//! All conversation state is held in a map and lost on restart.

use super::{ConversationStore, DEFAULT_TIMEOUT_MINUTES};
use crate::state_machine::{Conversation, ConversationUpdate};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory conversation store.
///
/// Stale conversations are detected lazily when accessed; nothing sweeps
/// the map in the background.
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Conversation>>,
    timeout: Duration,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::with_timeout(Duration::minutes(DEFAULT_TIMEOUT_MINUTES))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    /// Number of contacts with a stored conversation
    #[cfg(test)]
    pub async fn contact_count(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Push a conversation's `last_updated` into the past (for testing timeouts)
    #[cfg(test)]
    pub async fn backdate(&self, contact: &str, by: Duration) {
        if let Some(conversation) = self.conversations.write().await.get_mut(contact) {
            conversation.last_updated -= by;
        }
    }

    /// Overwrite a stored conversation (for testing corrupt records)
    #[cfg(test)]
    pub async fn insert(&self, contact: &str, conversation: Conversation) {
        self.conversations
            .write()
            .await
            .insert(contact.to_string(), conversation);
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get_or_create(&self, contact: &str) -> Conversation {
        let now = Utc::now();
        let mut conversations = self.conversations.write().await;

        if let Some(existing) = conversations.get(contact) {
            if now - existing.last_updated <= self.timeout {
                return existing.clone();
            }
            tracing::info!(
                contact = %contact,
                state = %existing.state,
                "Conversation timed out, starting over"
            );
        }

        let fresh = Conversation::new(now);
        conversations.insert(contact.to_string(), fresh.clone());
        fresh
    }

    async fn get(&self, contact: &str) -> Option<Conversation> {
        let now = Utc::now();
        self.conversations
            .read()
            .await
            .get(contact)
            .filter(|c| now - c.last_updated <= self.timeout)
            .cloned()
    }

    async fn update(&self, contact: &str, update: ConversationUpdate) {
        if let Some(conversation) = self.conversations.write().await.get_mut(contact) {
            conversation.apply(update, Utc::now());
        }
    }

    async fn reset(&self, contact: &str) {
        self.conversations.write().await.remove(contact);
    }
}
