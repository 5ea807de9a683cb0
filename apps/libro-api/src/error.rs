//! Error types for the book API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No book exists for building: {0}")]
    NoBookForBuilding(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Unknown section type: {0}")]
    UnknownSectionType(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NoBookForBuilding(id) => (
                StatusCode::NOT_FOUND,
                format!("No book exists for building: {}", id),
            ),
            ApiError::BookNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Book not found: {}", id))
            }
            ApiError::UnknownSectionType(t) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown section type: {}", t),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
