//! Review collection state machine
//!
//! Pure transitions in the Elm style: the transition function inspects a
//! conversation and an inbound message and returns the reply plus the
//! effects the store must apply. It never performs I/O and never fails.

mod effect;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use state::{CompletedReview, Conversation, ConversationState, ConversationUpdate};
pub use transition::transition;
