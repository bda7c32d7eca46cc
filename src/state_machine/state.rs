//! Conversation state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a contact is in the review flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Never prompted
    #[default]
    Initial,
    AwaitingProduct,
    AwaitingName,
    AwaitingReview,
    /// All fields gathered, waiting to be extracted and persisted
    Completed,
}

impl ConversationState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::Initial => "initial",
            ConversationState::AwaitingProduct => "awaiting_product",
            ConversationState::AwaitingName => "awaiting_name",
            ConversationState::AwaitingReview => "awaiting_review",
            ConversationState::Completed => "completed",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-contact conversation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub state: ConversationState,
    pub product_name: Option<String>,
    pub user_name: Option<String>,
    pub product_review: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl Conversation {
    /// A fresh conversation in the `Initial` state
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: ConversationState::Initial,
            product_name: None,
            user_name: None,
            product_review: None,
            last_updated: now,
        }
    }

    /// Check that every field the current state depends on is populated.
    pub fn is_consistent(&self) -> bool {
        match self.state {
            ConversationState::Initial | ConversationState::AwaitingProduct => true,
            ConversationState::AwaitingName => self.product_name.is_some(),
            ConversationState::AwaitingReview => {
                self.product_name.is_some() && self.user_name.is_some()
            }
            ConversationState::Completed => {
                self.product_name.is_some()
                    && self.user_name.is_some()
                    && self.product_review.is_some()
            }
        }
    }

    /// Merge an update into this conversation and refresh `last_updated`.
    pub fn apply(&mut self, update: ConversationUpdate, now: DateTime<Utc>) {
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(product_name) = update.product_name {
            self.product_name = Some(product_name);
        }
        if let Some(user_name) = update.user_name {
            self.user_name = Some(user_name);
        }
        if let Some(product_review) = update.product_review {
            self.product_review = Some(product_review);
        }
        self.last_updated = now;
    }

    /// Extract the review fields, only once the flow has completed.
    pub fn completed_review(&self, contact_number: &str) -> Option<CompletedReview> {
        if self.state != ConversationState::Completed {
            return None;
        }
        Some(CompletedReview {
            contact_number: contact_number.to_string(),
            product_name: self.product_name.clone()?,
            user_name: self.user_name.clone()?,
            product_review: self.product_review.clone()?,
        })
    }
}

/// Partial set of fields to merge into a stored conversation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationUpdate {
    pub state: Option<ConversationState>,
    pub product_name: Option<String>,
    pub user_name: Option<String>,
    pub product_review: Option<String>,
}

impl ConversationUpdate {
    pub fn state(state: ConversationState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    pub fn with_product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_product_review(mut self, product_review: impl Into<String>) -> Self {
        self.product_review = Some(product_review.into());
        self
    }
}

/// Review fields gathered by a completed conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedReview {
    pub contact_number: String,
    pub product_name: String,
    pub user_name: String,
    pub product_review: String,
}
