//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │    Exception     │ ← 500 JSON if anything inside panics
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Logging      │ ← method/path in, status out
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  Authentication  │ ← 401 if the bearer token is wrong (no bypass)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │   Body Limit     │ ← caps JSON payload size
//! └────────┬─────────┘
//!          │
//!          ▼
//!      Handler
//! ```
//!
//! # Routes
//!
//! - `/users`, `/users/{id}` - User CRUD
//! - `/exception-test/{num}` - Diagnostic division endpoint

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower::ServiceBuilder;
use tracing::info;

use crate::handlers;
use crate::middleware::{BearerAuth, RequestLoggingLayer, exception_layer};
use crate::state::AppState;

/// Build the application router with all routes and the fixed stage order.
///
/// The route table is static; nothing is registered after startup.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let router = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/exception-test/{num}", get(handlers::exception_test))
        .layer(DefaultBodyLimit::max(config.max_request_body_size));

    info!(
        max_body_bytes = config.max_request_body_size,
        "Request pipeline: exception -> logging -> auth -> handler"
    );

    // ServiceBuilder lists layers outermost first
    let pipeline = ServiceBuilder::new()
        .layer(exception_layer())
        .layer(RequestLoggingLayer::new())
        .layer(BearerAuth::new(config.auth_token.as_str()));

    router.layer(pipeline).with_state(state)
}
