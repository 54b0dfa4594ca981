//! Server-wide error taxonomy
//!
//! Every feature error converts into [`AppError`], which is the only error
//! type route handlers return. The mapping to HTTP is:
//!
//! | Variant | Status | Code |
//! |---|---|---|
//! | `Validation` | 400 | `VALIDATION_ERROR` |
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `Conflict` | 409 | `CONFLICT` |
//! | `Database` | 500 | `INTERNAL_ERROR` |
//!
//! Database causes are logged and replaced by a generic message in the body.
//! Malformed request bodies arrive as `Validation` through
//! [`crate::api::extract::Json`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::features::shared::validation::ValidationError;

/// Result type alias for handler code
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let body = match self {
            AppError::Validation(ref err) => match err.field {
                Some(field) => {
                    ErrorResponse::with_details(code, err.to_string(), json!({ "field": field }))
                },
                None => ErrorResponse::new(code, err.to_string()),
            },
            AppError::NotFound(message) | AppError::Conflict(message) => {
                ErrorResponse::new(code, message)
            },
            AppError::Database(ref e) => {
                tracing::error!(error = ?e, "Database error");
                ErrorResponse::new(code, "A database error occurred")
            },
        };

        (status, Json(body)).into_response()
    }
}
