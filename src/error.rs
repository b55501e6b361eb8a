//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Oracle error code for a unique constraint violation.
pub(crate) const ORA_UNIQUE_VIOLATION: i32 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
    #[error("environment variable {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{field} already exists")]
    Duplicate { field: &'static str },
    #[error("customer {id} not found")]
    NotFound { id: i64 },
    #[error("database: {0}")]
    Database(#[from] oracle::Error),
    /// Existing objects conflict with the expected schema.
    #[error("schema: {0}")]
    Schema(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl StoreError {
    /// Classify a driver error, surfacing unique violations as [`StoreError::Duplicate`].
    pub(crate) fn from_oracle(err: oracle::Error, unique_field: &'static str) -> Self {
        match err.db_error().map(|db| db.code()) {
            Some(ORA_UNIQUE_VIOLATION) => StoreError::Duplicate { field: unique_field },
            _ => StoreError::Database(err),
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Internal(err.to_string())
    }
}

/// Per-request failure, rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
