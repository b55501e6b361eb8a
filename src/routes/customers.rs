//! Customer API routes with permissive CORS headers.

use crate::handlers::customers::{create, list, method_not_allowed, preflight, read};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Enforced by the body extractor, so oversize bodies surface as a JSON 400.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/customers",
            get(list)
                .post(create)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/customers/:id",
            get(read).options(preflight).fallback(method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,OPTIONS"),
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
