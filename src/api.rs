//! HTTP API for the review collector
//!
//! Channel webhook plus the review query API.

mod handlers;
mod twiml;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::ingest::ProductionService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProductionService>,
}

impl AppState {
    pub fn new(service: ProductionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
