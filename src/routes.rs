//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /xmlrpc`          - XML-RPC endpoint (pingback methods)
//! - `GET  /trackback/{id}`  - Redirect to the entry
//! - `POST /trackback/{id}`  - Trackback form submission
//! - `POST /notify`          - Publish notification (internal integration)
//! - `GET  /health`          - Health check: DB, notification queue

use axum::Router;
use axum::routing::{get, post};

use crate::api::handlers::{
    health_handler, notify_handler, trackback_get_handler, trackback_post_handler, xmlrpc_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// Path normalization is applied around the finished router in
/// [`crate::server`], keeping this one directly drivable by tests.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/xmlrpc", post(xmlrpc_handler))
        .route(
            "/trackback/{id}",
            get(trackback_get_handler).post(trackback_post_handler),
        )
        .route("/notify", post(notify_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}
