//! Process configuration read from the environment

use crate::store::DEFAULT_TIMEOUT_MINUTES;
use chrono::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    /// Idle time after which a partial conversation starts over
    pub conversation_timeout: Duration,
    /// Origins allowed to call the query API from a browser
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("REVIEW_DB_PATH").unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
            format!("{home}/.review-collector/reviews.db")
        });

        let port = lookup("REVIEW_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let conversation_timeout = lookup("REVIEW_CONVERSATION_TIMEOUT_MINUTES")
            .and_then(|m| m.parse::<i64>().ok())
            .filter(|m| *m > 0)
            .and_then(Duration::try_minutes)
            .unwrap_or_else(|| Duration::minutes(DEFAULT_TIMEOUT_MINUTES));

        let allowed_origins = lookup("REVIEW_ALLOWED_ORIGINS").map_or_else(
            || DEFAULT_ALLOWED_ORIGINS.iter().map(ToString::to_string).collect(),
            |origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            },
        );

        Self {
            db_path,
            port,
            conversation_timeout,
            allowed_origins,
        }
    }
}
