//! NextBus error types

use thiserror::Error;

/// Errors that can occur while talking to the NextBus feed
#[derive(Debug, Error)]
pub enum NextBusError {
    /// Connection to the feed failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Feed answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body is not well-formed XML
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Route tag or stop id unusable for a request
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl NextBusError {
    /// Returns true if the feed could not be reached or refused the request
    #[must_use]
    pub const fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
