//! Customer handlers: list, create, read, plus preflight and method fallback.

use crate::error::{AppError, StoreError};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .store
        .list()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((StatusCode::OK, Json(rows)))
}

/// Every store rejection on create is a client error, duplicate email included.
/// A body that cannot be read (over the size cap) is reported like a malformed one.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map_err(|e| {
        tracing::debug!(error = %e, "unreadable create body");
        AppError::BadRequest("invalid JSON body".into())
    })?;
    let req = RequestValidator::parse_create(&body)?;
    let new = RequestValidator::validate_create(req)?;
    let row = state.store.create(new).await.map_err(|e| {
        tracing::warn!(error = %e, "create rejected");
        AppError::BadRequest(e.to_string())
    })?;
    tracing::info!(id = row.id, "customer created");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: i64 = id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))?;
    let row = state.store.get(id).await.map_err(|e| match e {
        StoreError::NotFound { .. } => AppError::NotFound(e.to_string()),
        _ => AppError::Internal(e.to_string()),
    })?;
    Ok((StatusCode::OK, Json(row)))
}

/// CORS preflight. Headers come from the router's response layers.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
