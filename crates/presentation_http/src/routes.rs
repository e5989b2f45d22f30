//! Route definitions

use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// Requests running longer than `request_timeout` are answered with
/// `504 Gateway Timeout`. The feed client times out first under a valid
/// configuration, so this only guards against a stalled store.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Arrival lookup
        .route("/", get(handlers::arrival::next_arrival))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
