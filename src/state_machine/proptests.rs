//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::*;
use super::*;
use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Apply effects the way a store would, without any storage.
fn apply_effects(conversation: &Conversation, effects: &[Effect]) -> Conversation {
    let mut next = conversation.clone();
    for effect in effects {
        match effect {
            Effect::ResetConversation => next = Conversation::new(Utc::now()),
            Effect::UpdateConversation(update) => next.apply(update.clone(), Utc::now()),
        }
    }
    next
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ConversationState> {
    prop_oneof![
        Just(ConversationState::Initial),
        Just(ConversationState::AwaitingProduct),
        Just(ConversationState::AwaitingName),
        Just(ConversationState::AwaitingReview),
        Just(ConversationState::Completed),
    ]
}

fn arb_field() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 ]{0,20}")
}

/// Any conversation, including ones whose fields do not match the state
fn arb_conversation() -> impl Strategy<Value = Conversation> {
    (arb_state(), arb_field(), arb_field(), arb_field()).prop_map(
        |(state, product_name, user_name, product_review)| Conversation {
            state,
            product_name,
            user_name,
            product_review,
            last_updated: Utc::now(),
        },
    )
}

fn arb_message() -> impl Strategy<Value = String> {
    "\\PC{0,40}"
}

/// Text without surrounding whitespace
fn arb_answer() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 .,!']{0,30}[a-zA-Z0-9.!]"
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every transition lands on a conversation whose fields match its state
    #[test]
    fn prop_transition_preserves_field_invariant(
        conv in arb_conversation(),
        message in arb_message(),
    ) {
        let result = transition(&conv, &message);
        let next = apply_effects(&conv, &result.effects);
        prop_assert!(next.is_consistent(), "inconsistent: {:?}", next);
        prop_assert!(!result.response.is_empty());
    }

    /// Only the AwaitingReview step reports completion
    #[test]
    fn prop_completion_only_from_awaiting_review(
        conv in arb_conversation(),
        message in arb_message(),
    ) {
        let result = transition(&conv, &message);
        if result.is_complete {
            prop_assert_eq!(conv.state, ConversationState::AwaitingReview);
            let next = apply_effects(&conv, &result.effects);
            prop_assert_eq!(next.state, ConversationState::Completed);
        }
    }

    /// Corrupt conversations always restart at the product prompt
    #[test]
    fn prop_corrupt_conversation_recovers(
        conv in arb_conversation(),
        message in arb_message(),
    ) {
        prop_assume!(!conv.is_consistent());
        let result = transition(&conv, &message);
        prop_assert_eq!(result.response.as_str(), RECOVERY_PROMPT);
        let next = apply_effects(&conv, &result.effects);
        prop_assert_eq!(next.state, ConversationState::AwaitingProduct);
        prop_assert_eq!(next.product_name, None);
    }

    /// Four messages complete exactly once with the 2nd..4th answers stored
    #[test]
    fn prop_happy_path_completes_once(
        opener in arb_message(),
        product in arb_answer(),
        name in arb_answer(),
        review in arb_answer(),
    ) {
        let mut conv = Conversation::new(Utc::now());
        let mut completions = 0;
        for message in [&opener, &product, &name, &review] {
            let result = transition(&conv, message);
            if result.is_complete {
                completions += 1;
            }
            conv = apply_effects(&conv, &result.effects);
        }

        prop_assert_eq!(completions, 1);
        let completed = conv.completed_review("+15550100");
        prop_assert!(completed.is_some());
        let completed = completed.unwrap();
        prop_assert_eq!(completed.product_name, product);
        prop_assert_eq!(completed.user_name, name);
        prop_assert_eq!(completed.product_review, review);
    }
}
