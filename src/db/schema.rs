//! Database schema and types

use crate::state_machine::CompletedReview;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_number TEXT NOT NULL,
    user_name TEXT NOT NULL,
    product_name TEXT NOT NULL,
    product_review TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reviews_created ON reviews(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_reviews_contact ON reviews(contact_number);
";

/// Persisted review record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub contact_number: String,
    pub user_name: String,
    pub product_name: String,
    pub product_review: String,
    pub created_at: DateTime<Utc>,
}

/// Review fields supplied by the caller; `id` and `created_at` are assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub contact_number: String,
    pub user_name: String,
    pub product_name: String,
    pub product_review: String,
}

impl From<CompletedReview> for NewReview {
    fn from(completed: CompletedReview) -> Self {
        Self {
            contact_number: completed.contact_number,
            user_name: completed.user_name,
            product_name: completed.product_name,
            product_review: completed.product_review,
        }
    }
}
