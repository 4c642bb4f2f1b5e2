use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// HTTP-facing error vocabulary. Every variant carries a machine-readable
/// reason code alongside the human-readable message; server faults keep the
/// detail in the logs and respond with a generic message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {1}")]
    NotFound(&'static str, String),

    #[error("Bad Request: {1}")]
    BadRequest(&'static str, String),

    #[error("Unprocessable: {1}")]
    Unprocessable(&'static str, String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(code, msg) => (StatusCode::NOT_FOUND, code, msg),
            AppError::BadRequest(code, msg) => (StatusCode::BAD_REQUEST, code, msg),
            AppError::Unprocessable(code, msg) => (StatusCode::UNPROCESSABLE_ENTITY, code, msg),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(detail) => {
                tracing::error!("Database error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        if status.is_client_error() {
            tracing::warn!("Request rejected ({}): {}", code, message);
        }

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}
