use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::llm_client::{self, LlmError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User already exists")]
    UserExists,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Rate limited")]
    RateLimited,

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserExists => AppError::UserExists,
            StoreError::UserNotFound => AppError::NotFound("User not found".to_string()),
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Corrupt(e) => AppError::Internal(e.into()),
        }
    }
}

/// Maps an LLM failure into the right API error. Rate-limit failures carry
/// the cooldown hint users see in the UI; parse and extraction failures ask
/// for a retry; everything else is reported against the calling operation.
pub fn llm_failure(context: &str, err: &LlmError) -> AppError {
    if llm_client::is_rate_limit(err) {
        return AppError::RateLimited;
    }
    match err {
        LlmError::Extract(_) | LlmError::Parse(_) => {
            AppError::MalformedResponse("Failed to parse AI response. Please try again.".to_string())
        }
        other => AppError::Llm(format!("{context}: {other}")),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UserExists => (
                StatusCode::CONFLICT,
                "USER_EXISTS",
                "An account with this email already exists".to_string(),
            ),
            AppError::IncorrectPassword => (
                StatusCode::UNAUTHORIZED,
                "INCORRECT_PASSWORD",
                "Incorrect password".to_string(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "AI system is experiencing high traffic. Please wait 60 seconds and try again."
                    .to_string(),
            ),
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed AI response: {msg}");
                (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", msg.clone())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
