//! Mock implementations for testing
//!
//! These mocks enable service testing without a database.

use super::traits::{ReviewStore, StoreError};
use crate::db::{NewReview, Review};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// ============================================================================
// In-Memory Review Store
// ============================================================================

/// In-memory review store with a switch to simulate outages
pub struct InMemoryReviewStore {
    reviews: Mutex<Vec<Review>>,
    next_id: Mutex<i64>,
    failing: AtomicBool,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self {
            reviews: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a backend error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of stored reviews in insertion order
    pub fn all(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated outage".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        self.check()?;
        let mut next_id = self.next_id.lock().unwrap();
        let stored = Review {
            id: *next_id,
            contact_number: review.contact_number,
            user_name: review.user_name,
            product_name: review.product_name,
            product_review: review.product_review,
            created_at: Utc::now(),
        };
        *next_id += 1;
        self.reviews.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Review>, StoreError> {
        self.check()?;
        let mut reviews = self.all();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }

    async fn get(&self, id: i64) -> Result<Review, StoreError> {
        self.check()?;
        self.reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.check()?;
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        if reviews.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
