//! Database module for the review collector
//!
//! Provides persistence for completed reviews.

mod schema;

pub use schema::*;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Review not found: {0}")]
    ReviewNotFound(i64),
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

const REVIEW_COLUMNS: &str =
    "id, contact_number, user_name, product_name, product_review, created_at";

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Review Operations ====================

    /// Insert a review, assigning its id and creation time.
    ///
    /// The insert runs in its own transaction and is committed before returning.
    pub fn insert_review(&self, review: &NewReview) -> DbResult<Review> {
        let mut conn = self.lock()?;
        let now = Utc::now();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO reviews (contact_number, user_name, product_name, product_review, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                review.contact_number,
                review.user_name,
                review.product_name,
                review.product_review,
                format_datetime(&now),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Review {
            id,
            contact_number: review.contact_number.clone(),
            user_name: review.user_name.clone(),
            product_name: review.product_name.clone(),
            product_review: review.product_review.clone(),
            created_at: now,
        })
    }

    /// List all reviews, newest first
    pub fn list_reviews(&self) -> DbResult<Vec<Review>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([], parse_review_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Get review by ID
    pub fn get_review(&self, id: i64) -> DbResult<Review> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"
        ))?;

        stmt.query_row(params![id], parse_review_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::ReviewNotFound(id),
                other => DbError::Sqlite(other),
            })
    }

    /// Delete a review permanently
    pub fn delete_review(&self, id: i64) -> DbResult<()> {
        let conn = self.lock()?;

        let deleted = conn.execute("DELETE FROM reviews WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(DbError::ReviewNotFound(id));
        }
        Ok(())
    }
}

/// Parse a review row from the database
fn parse_review_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        contact_number: row.get(1)?,
        user_name: row.get(2)?,
        product_name: row.get(3)?,
        product_review: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

// Fixed-width UTC timestamps so that text ordering matches time ordering
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
