//! HTTP request handlers

use super::twiml;
use super::types::{ErrorResponse, InboundMessage, MessageResponse};
use super::AppState;
use crate::db::Review;
use crate::ingest::ServiceError;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        // Messaging channel webhook
        .route("/webhook/whatsapp", post(whatsapp_webhook))
        // Review query API
        .route("/api/reviews", get(list_reviews))
        .route("/api/reviews/:id", get(get_review).delete(delete_review))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("WhatsApp Product Review Collector API"))
}

// ============================================================
// Channel Webhook
// ============================================================

async fn whatsapp_webhook(
    State(state): State<AppState>,
    Form(inbound): Form<InboundMessage>,
) -> Result<Response, AppError> {
    tracing::debug!(contact = %inbound.from, "Inbound message");

    let reply = state
        .service
        .handle_inbound_message(&inbound.from, inbound.body.trim())
        .await?;

    Ok((
        [(header::CONTENT_TYPE, twiml::CONTENT_TYPE)],
        twiml::message_response(&reply),
    )
        .into_response())
}

// ============================================================
// Review Query API
// ============================================================

async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.service.list_reviews().await?))
}

async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(state.service.get_review(id).await?))
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.service.delete_review(id).await?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}

async fn get_version() -> &'static str {
    concat!("review-collector ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    NotFound(String),
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => AppError::NotFound(e.to_string()),
            ServiceError::Storage(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
