//! Pure state transition function
//!
//! The flow is a strict linear pipeline: product, name, review. Any text is
//! accepted as the answer to the current question once trimmed.

use super::{Conversation, ConversationState, ConversationUpdate, Effect};

pub const PRODUCT_PROMPT: &str = "Which product is this review for?";
pub const NAME_PROMPT: &str = "What's your name?";
pub const RESTART_PROMPT: &str =
    "Great! Let's collect another review. Which product is this review for?";
pub const RECOVERY_PROMPT: &str =
    "Something went wrong. Let's start over. Which product is this review for?";

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub response: String,
    /// Set only on the step that gathers the last field
    pub is_complete: bool,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn reply(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            is_complete: false,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn completed(mut self) -> Self {
        self.is_complete = true;
        self
    }
}

/// Pure transition function
///
/// Given the stored conversation and the inbound message, decide the reply
/// and how the conversation must change. A conversation whose fields do not
/// match its state is recovered by restarting at the product prompt.
pub fn transition(conversation: &Conversation, message: &str) -> TransitionResult {
    let text = message.trim();

    match (
        conversation.state,
        conversation.product_name.as_deref(),
        conversation.user_name.as_deref(),
    ) {
        (ConversationState::Initial, _, _) => TransitionResult::reply(PRODUCT_PROMPT)
            .with_effect(Effect::enter(ConversationState::AwaitingProduct)),

        (ConversationState::AwaitingProduct, _, _) => TransitionResult::reply(NAME_PROMPT)
            .with_effect(Effect::UpdateConversation(
                ConversationUpdate::state(ConversationState::AwaitingName).with_product_name(text),
            )),

        (ConversationState::AwaitingName, Some(product_name), _) => {
            TransitionResult::reply(format!("Please send your review for {product_name}."))
                .with_effect(Effect::UpdateConversation(
                    ConversationUpdate::state(ConversationState::AwaitingReview)
                        .with_user_name(text),
                ))
        }

        (ConversationState::AwaitingReview, Some(product_name), Some(user_name)) => {
            TransitionResult::reply(thank_you_message(user_name, product_name, text))
                .with_effect(Effect::UpdateConversation(
                    ConversationUpdate::state(ConversationState::Completed)
                        .with_product_review(text),
                ))
                .completed()
        }

        // Reached only when the previous review was never extracted
        (ConversationState::Completed, _, _) if conversation.is_consistent() => {
            TransitionResult::reply(RESTART_PROMPT)
                .with_effect(Effect::ResetConversation)
                .with_effect(Effect::enter(ConversationState::AwaitingProduct))
        }

        _ => TransitionResult::reply(RECOVERY_PROMPT)
            .with_effect(Effect::ResetConversation)
            .with_effect(Effect::enter(ConversationState::AwaitingProduct)),
    }
}

fn thank_you_message(user_name: &str, product_name: &str, review: &str) -> String {
    format!(
        "✅ Thank you, {user_name}! Your review for {product_name} has been successfully recorded.\n\n\
         📝 Your review: \"{review}\"\n\n\
         Want to submit another review? Just send any message to start over!"
    )
}
