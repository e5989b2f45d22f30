//! Arrival prediction feed port
//!
//! Adapters in the infrastructure layer fetch predictions from a real-time
//! transit feed and return at most [`domain::MAX_PREDICTIONS`] valid entries.

use async_trait::async_trait;
use domain::{Prediction, PredictionQuery};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for real-time arrival predictions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PredictionFeedPort: Send + Sync {
    /// Fetch predictions for one route at one stop
    ///
    /// A feed without usable predictions yields an empty list. Errors are
    /// reserved for an unreachable feed or an unreadable document.
    async fn fetch(&self, query: &PredictionQuery) -> Result<Vec<Prediction>, ApplicationError>;

    /// Check if the feed can be reached
    async fn is_available(&self) -> bool;
}
