//! API error handling
//!
//! Errors are returned as short plain-text bodies. Internal details are only
//! logged, never sent to the caller.

use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Body for any rejected arrival request
pub const INVALID_PARAMETERS: &str =
    "Missing or invalid parameters. Expect lat, lon, and route_tag.";

/// Body for any server-side failure
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(reason) => {
                tracing::debug!(%reason, "Rejected request");
                (StatusCode::BAD_REQUEST, INVALID_PARAMETERS).into_response()
            },
            Self::Internal(detail) => {
                error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR).into_response()
            },
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::BadRequest("lat".to_string()).to_string(),
            "Bad request: lat"
        );
        assert_eq!(
            ApiError::Internal("db".to_string()).to_string(),
            "Internal error: db"
        );
    }

    #[test]
    fn client_errors_become_bad_request() {
        let err: ApiError = ApplicationError::InvalidInput("lat".into()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError =
            ApplicationError::Domain(DomainError::ValidationError("route".into())).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn server_errors_become_internal() {
        for err in [
            ApplicationError::NotFound("no stops".into()),
            ApplicationError::ExternalService("HTTP 503".into()),
            ApplicationError::Parse("truncated".into()),
            ApplicationError::Configuration("bad url".into()),
            ApplicationError::Internal("boom".into()),
        ] {
            assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
        }
    }

    #[test]
    fn bad_request_response_is_plain_text() {
        let response = ApiError::BadRequest("lat".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }

    #[test]
    fn internal_response_status() {
        let response = ApiError::Internal("secret path /var/db".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
