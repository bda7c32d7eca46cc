//! Effects produced by state transitions

use super::state::{ConversationState, ConversationUpdate};

/// Store mutations to apply, in order, after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drop the stored conversation and start from a fresh record
    ResetConversation,

    /// Merge fields into the stored conversation
    UpdateConversation(ConversationUpdate),
}

impl Effect {
    pub fn enter(state: ConversationState) -> Self {
        Effect::UpdateConversation(ConversationUpdate::state(state))
    }
}
