//! Review Collector - chat-driven product review intake
//!
//! Walks each messaging contact through a fixed product, name, review flow,
//! stores finished reviews in SQLite, and serves them over a JSON API.

mod api;
mod config;
mod db;
mod ingest;
mod state_machine;
mod store;

use api::{create_router, AppState};
use axum::http::HeaderValue;
use config::Config;
use db::Database;
use ingest::{DatabaseReviewStore, ReviewService};
use std::net::SocketAddr;
use std::path::PathBuf;
use store::InMemoryConversationStore;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_collector=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path, "Opening database");
    let db = Database::open(&config.db_path)?;

    tracing::info!(
        timeout_minutes = config.conversation_timeout.num_minutes(),
        "Conversation store initialized"
    );
    let service = ReviewService::new(
        InMemoryConversationStore::with_timeout(config.conversation_timeout),
        DatabaseReviewStore::new(db),
    );
    let state = AppState::new(service);

    let origins = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Review collector listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
