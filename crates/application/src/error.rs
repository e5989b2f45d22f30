//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream service unreachable or answered with an error status
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Upstream document could not be parsed at all
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the caller caused this error
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::Domain(DomainError::InvalidInput(_) | DomainError::ValidationError(_))
        )
    }

    /// Whether the upstream feed was unavailable
    pub const fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}
