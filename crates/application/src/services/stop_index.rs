//! Nearest-stop resolution
//!
//! Scans the full stop catalogue on every call and picks the stop with the
//! smallest great-circle distance to the caller.

use std::{fmt, sync::Arc};

use domain::{GeoLocation, Stop};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::StopRepository};

/// Pick the stop closest to `query`
///
/// Stops are compared in the given order and only a strictly smaller distance
/// replaces the current best, so the earliest stop wins ties. Stops whose
/// distance is not a number are skipped.
pub fn select_nearest<'a>(stops: &'a [Stop], query: &GeoLocation) -> Option<&'a Stop> {
    let mut best: Option<(&Stop, f64)> = None;

    for stop in stops {
        let distance = stop.distance_km(query);
        if distance.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((stop, distance));
        }
    }

    best.map(|(stop, _)| stop)
}

/// Nearest-stop lookup over a [`StopRepository`]
pub struct StopIndex {
    repository: Arc<dyn StopRepository>,
}

impl fmt::Debug for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopIndex").finish_non_exhaustive()
    }
}

impl StopIndex {
    pub fn new(repository: Arc<dyn StopRepository>) -> Self {
        Self { repository }
    }

    /// Find the stop nearest to `query`
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the query has non-finite components
    /// - `NotFound` if the catalogue is empty
    /// - any error raised by the repository
    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn nearest(&self, query: &GeoLocation) -> Result<Stop, ApplicationError> {
        if !query.is_finite() {
            return Err(ApplicationError::InvalidInput(
                "coordinates must be finite numbers".to_string(),
            ));
        }

        let stops = self.repository.list().await?;
        debug!(candidates = stops.len(), "Scanning stops");

        let nearest = select_nearest(&stops, query)
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound("no stops available".to_string()))?;

        debug!(stop_id = %nearest.id, "Resolved nearest stop");
        Ok(nearest)
    }
}
