//! DocSearch development backend.
//!
//! Serves the endpoint the search widget posts to, backed by a small in-memory
//! catalog, so the desktop app and CLI can be exercised without the real search
//! service.
//!
//! # Modules
//!
//! - [`catalog`] — Document catalog and substring filtering
//! - [`api`] — Axum handlers: `/search/`, `/test/`, `/health`
//! - [`types`] — Application context and limits

pub mod api;
pub mod catalog;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use api::{api_health, api_search, api_test};
use types::AppContext;

/// Build the full application router.
///
/// CORS is permissive: the widget is usually served from a different origin than
/// this backend during development.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/search/", post(api_search))
        .route("/test/", get(api_test))
        .route("/health", get(api_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
