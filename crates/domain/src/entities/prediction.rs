//! Arrival predictions and the query that produces them

use serde::{Deserialize, Serialize};

use crate::value_objects::{RouteTag, StopId};

/// Maximum number of predictions carried for a single lookup
pub const MAX_PREDICTIONS: usize = 2;

/// Estimated time until a vehicle arrives at a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    minutes: u32,
    seconds: u32,
}

impl Prediction {
    /// Create a prediction from whole minutes and a seconds value
    ///
    /// Feeds report `seconds` either as the remainder within the minute or as
    /// the total number of seconds. Values of 60 or more are reduced to the
    /// remainder so `seconds()` is always in `0..60`.
    #[must_use]
    pub const fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes,
            seconds: seconds % 60,
        }
    }

    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }
}

/// Which route at which stop to ask the feed about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionQuery {
    pub route_tag: RouteTag,
    pub stop_id: StopId,
}

impl PredictionQuery {
    pub const fn new(route_tag: RouteTag, stop_id: StopId) -> Self {
        Self { route_tag, stop_id }
    }
}
