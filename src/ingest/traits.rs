//! Trait abstractions for review persistence
//!
//! These traits enable testing the service with mock implementations.

use crate::db::{Database, DbError, NewReview, Review};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure from a review store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Review not found: {0}")]
    NotFound(i64),
    #[error("{0}")]
    Backend(String),
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::ReviewNotFound(id) => StoreError::NotFound(id),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Durable storage for completed reviews
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persist a review, assigning its id and creation time
    async fn insert(&self, review: NewReview) -> Result<Review, StoreError>;

    /// All reviews, newest first
    async fn list(&self) -> Result<Vec<Review>, StoreError>;

    async fn get(&self, id: i64) -> Result<Review, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

// ============================================================================
// Arc implementation for trait objects
// ============================================================================

#[async_trait]
impl<T: ReviewStore + ?Sized> ReviewStore for Arc<T> {
    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        (**self).insert(review).await
    }

    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        (**self).list().await
    }

    async fn get(&self, id: i64) -> Result<Review, StoreError> {
        (**self).get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter to use Database as a `ReviewStore`
#[derive(Clone)]
pub struct DatabaseReviewStore {
    db: Database,
}

impl DatabaseReviewStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewStore for DatabaseReviewStore {
    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        self.db.insert_review(&review).map_err(StoreError::from)
    }

    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        self.db.list_reviews().map_err(StoreError::from)
    }

    async fn get(&self, id: i64) -> Result<Review, StoreError> {
        self.db.get_review(id).map_err(StoreError::from)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.db.delete_review(id).map_err(StoreError::from)
    }
}
