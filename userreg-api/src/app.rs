//! Application state and router builder
//!
//! This module defines the shared application state and provides
//! a function to build the Axum router with all routes and middleware.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use userreg_api::app::{build_router, AppState};
//! use userreg_shared::store::InMemoryUserStore;
//!
//! let state = AppState::new(Arc::new(InMemoryUserStore::new()));
//! let app = build_router(state);
//! ```

use crate::middleware::cors::CorsHeadersLayer;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use userreg_shared::store::UserStore;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The store is
/// injected here rather than held globally so tests can swap in an in-memory
/// or failing implementation.
#[derive(Clone)]
pub struct AppState {
    /// User record store
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health              # Health check
/// └── /v1/
///     ├── POST /users               # Create user
///     └── GET  /users?email=...     # Look up user by email
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Wildcard CORS headers on every response; `OPTIONS` preflights answered with 204
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let v1_routes = Router::new().route(
        "/users",
        get(routes::users::get_user).post(routes::users::create_user),
    );

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsHeadersLayer)
        .with_state(state)
}
