//! Review ingestion service
//!
//! Sits between the messaging channel and storage: feeds inbound messages
//! to the conversation store, persists a review once a conversation
//! completes, and serves persisted reviews back out.

pub mod traits;

#[cfg(test)]
pub mod testing;

pub use traits::*;

use crate::db::{NewReview, Review};
use crate::store::{ConversationStore, InMemoryConversationStore};
use thiserror::Error;

/// Type alias for the production service with concrete implementations
pub type ProductionService = ReviewService<InMemoryConversationStore, DatabaseReviewStore>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Review not found")]
    NotFound(i64),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            StoreError::Backend(message) => ServiceError::Storage(message),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Orchestrates the conversation store and review storage
pub struct ReviewService<C, R> {
    conversations: C,
    reviews: R,
}

impl<C, R> ReviewService<C, R>
where
    C: ConversationStore,
    R: ReviewStore,
{
    pub fn new(conversations: C, reviews: R) -> Self {
        Self {
            conversations,
            reviews,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn conversations(&self) -> &C {
        &self.conversations
    }

    /// Handle one inbound channel message and return the reply text.
    ///
    /// When the message completes a conversation, the review is persisted
    /// and the conversation is cleared. If persistence fails the error is
    /// returned and the conversation stays completed.
    pub async fn handle_inbound_message(&self, contact: &str, text: &str) -> ServiceResult<String> {
        let (response, is_complete) = self.conversations.process_message(contact, text).await;

        if is_complete {
            if let Some(completed) = self.conversations.get_completed_data(contact).await {
                let review = self
                    .reviews
                    .insert(NewReview::from(completed))
                    .await
                    .map_err(|e| {
                        tracing::error!(contact = %contact, error = %e, "Failed to persist review");
                        ServiceError::from(e)
                    })?;

                tracing::info!(
                    review_id = review.id,
                    contact = %contact,
                    product = %review.product_name,
                    "Review recorded"
                );

                self.conversations.reset(contact).await;
            } else {
                tracing::warn!(contact = %contact, "Completion signalled but no review data found");
            }
        }

        Ok(response)
    }

    /// All reviews, newest first
    pub async fn list_reviews(&self) -> ServiceResult<Vec<Review>> {
        Ok(self.reviews.list().await?)
    }

    pub async fn get_review(&self, id: i64) -> ServiceResult<Review> {
        Ok(self.reviews.get(id).await?)
    }

    pub async fn delete_review(&self, id: i64) -> ServiceResult<()> {
        self.reviews.delete(id).await?;
        tracing::info!(review_id = id, "Review deleted");
        Ok(())
    }
}
