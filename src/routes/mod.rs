//! Router assembly.

mod common;
mod customers;

pub use common::common_routes;
pub use customers::customer_routes;

use crate::state::AppState;
use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Full application: API and health checks, with static files from `static_dir` for everything else.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(customer_routes(state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
