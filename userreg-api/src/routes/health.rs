//! Health check endpoint
//!
//! Reports whether the server is up and its user store is reachable.
//!
//! # Endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! # Response
//!
//! `200 OK` when the store answers, `503 Service Unavailable` otherwise:
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "store": "postgres"
//! }
//! ```

use crate::app::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// Store backend name
    pub store: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(err) => {
            warn!(error = %err, "Store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: state.store.backend().to_string(),
        }),
    )
}
