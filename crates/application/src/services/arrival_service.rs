//! Arrival lookup service
//!
//! Chains nearest-stop resolution, the prediction feed and the summarizer into
//! a single request.

use std::{fmt, sync::Arc};

use domain::{GeoLocation, MAX_PREDICTIONS, Prediction, PredictionQuery, RouteTag, StopId};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{PredictionFeedPort, StopRepository},
    services::{StopIndex, summarize},
};

/// Outcome of an arrival lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalSummary {
    pub stop_id: StopId,
    pub route_tag: RouteTag,
    pub predictions: Vec<Prediction>,
    pub message: String,
}

/// Arrival lookup for a caller location and route
pub struct ArrivalService {
    stop_index: StopIndex,
    feed: Arc<dyn PredictionFeedPort>,
}

impl fmt::Debug for ArrivalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrivalService")
            .field("stop_index", &self.stop_index)
            .finish_non_exhaustive()
    }
}

impl ArrivalService {
    /// Create a new arrival service
    pub fn new(stops: Arc<dyn StopRepository>, feed: Arc<dyn PredictionFeedPort>) -> Self {
        Self {
            stop_index: StopIndex::new(stops),
            feed,
        }
    }

    /// Whether the prediction feed answers a health probe
    pub async fn feed_available(&self) -> bool {
        self.feed.is_available().await
    }

    /// Resolve the nearest stop, fetch predictions and render the sentence
    ///
    /// # Errors
    ///
    /// Propagates errors from the stop index and the prediction feed. An
    /// empty feed is not an error.
    #[instrument(
        skip(self, location, route_tag),
        fields(location = %location, route_tag = %route_tag)
    )]
    pub async fn next_arrival(
        &self,
        location: &GeoLocation,
        route_tag: &RouteTag,
    ) -> Result<ArrivalSummary, ApplicationError> {
        let stop = self.stop_index.nearest(location).await?;

        let query = PredictionQuery::new(route_tag.clone(), stop.id.clone());
        let mut predictions = self.feed.fetch(&query).await?;
        predictions.truncate(MAX_PREDICTIONS);

        let message = summarize(route_tag.as_str(), &predictions);
        info!(
            stop_id = %stop.id,
            predictions = predictions.len(),
            "Arrival lookup complete"
        );

        Ok(ArrivalSummary {
            stop_id: stop.id,
            route_tag: route_tag.clone(),
            predictions,
            message,
        })
    }
}
