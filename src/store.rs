//! Per-contact conversation storage
//!
//! `ConversationStore` is the seam between the state machine and wherever
//! conversation state lives. The provided `process_message` drives the pure
//! transition against whichever backend implements the primitives.

mod memory;

pub use memory::InMemoryConversationStore;

use crate::state_machine::{
    transition, CompletedReview, Conversation, ConversationUpdate, Effect,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Default idle time after which a conversation starts over
pub const DEFAULT_TIMEOUT_MINUTES: i64 = 30;

/// Storage for per-contact conversation state.
///
/// Messages for the same contact are not serialized here. Two concurrent
/// messages from one contact can both read the same state and race on the
/// update; callers that need atomicity must serialize per contact.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Get the conversation for a contact, starting a new one if none exists
    /// or the stored one has been idle past the timeout.
    async fn get_or_create(&self, contact: &str) -> Conversation;

    /// Get the stored conversation without creating one.
    ///
    /// A conversation idle past the timeout is treated as absent.
    async fn get(&self, contact: &str) -> Option<Conversation>;

    /// Merge fields into the stored conversation. No-op for unknown contacts.
    async fn update(&self, contact: &str, update: ConversationUpdate);

    /// Forget the conversation for a contact
    async fn reset(&self, contact: &str);

    /// Advance the conversation with an inbound message.
    ///
    /// Returns the reply text and whether the flow just completed.
    async fn process_message(&self, contact: &str, message: &str) -> (String, bool) {
        let conversation = self.get_or_create(contact).await;
        let result = transition(&conversation, message);

        tracing::debug!(
            contact = %contact,
            from = %conversation.state,
            effects = result.effects.len(),
            is_complete = result.is_complete,
            "Conversation transition"
        );

        for effect in result.effects {
            match effect {
                Effect::ResetConversation => {
                    self.reset(contact).await;
                    self.get_or_create(contact).await;
                }
                Effect::UpdateConversation(update) => self.update(contact, update).await,
            }
        }

        (result.response, result.is_complete)
    }

    /// Review fields for a contact whose conversation has completed
    async fn get_completed_data(&self, contact: &str) -> Option<CompletedReview> {
        self.get(contact)
            .await
            .and_then(|conversation| conversation.completed_review(contact))
    }
}

// ============================================================================
// Arc implementation for shared stores
// ============================================================================

#[async_trait]
impl<T: ConversationStore + ?Sized> ConversationStore for Arc<T> {
    async fn get_or_create(&self, contact: &str) -> Conversation {
        (**self).get_or_create(contact).await
    }

    async fn get(&self, contact: &str) -> Option<Conversation> {
        (**self).get(contact).await
    }

    async fn update(&self, contact: &str, update: ConversationUpdate) {
        (**self).update(contact, update).await;
    }

    async fn reset(&self, contact: &str) {
        (**self).reset(contact).await;
    }

    async fn process_message(&self, contact: &str, message: &str) -> (String, bool) {
        (**self).process_message(contact, message).await
    }

    async fn get_completed_data(&self, contact: &str) -> Option<CompletedReview> {
        (**self).get_completed_data(contact).await
    }
}
