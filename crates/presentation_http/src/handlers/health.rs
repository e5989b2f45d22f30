//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub stops: StoreStatus,
    pub feed: FeedStatus,
}

/// Status of the stop catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStatus {
    pub available: bool,
    pub count: u64,
}

/// Status of the prediction feed, reported but not required for readiness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStatus {
    pub reachable: bool,
}

/// Readiness check - can the server answer arrival requests?
///
/// Requires a reachable store holding at least one stop. An unreachable
/// feed is reported without failing the check.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (available, reachable) = tokio::join!(
        state.stops.is_available(),
        state.arrival_service.feed_available()
    );
    if !reachable {
        warn!("Prediction feed is unreachable");
    }
    let count = if available {
        state.stops.count().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to count stops");
            0
        })
    } else {
        0
    };

    let ready = available && count > 0;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            stops: StoreStatus { available, count },
            feed: FeedStatus { reachable },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_deserialization() {
        let json = r#"{"status":"ok","version":"0.1.0"}"#;
        let resp: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, "0.1.0");
    }

    #[test]
    fn readiness_response_serialization() {
        let resp = ReadinessResponse {
            ready: true,
            stops: StoreStatus {
                available: true,
                count: 10_482,
            },
            feed: FeedStatus { reachable: false },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ready"], true);
        assert_eq!(json["stops"]["count"], 10_482);
        assert_eq!(json["feed"]["reachable"], false);
    }

    #[tokio::test]
    async fn health_check_returns_ok() {
        let response = health_check().await;
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }
}
