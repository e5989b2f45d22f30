//! Stop entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, StopId};

/// A physical transit stop
///
/// Only `id` and `location` take part in nearest-stop selection. `code` and
/// `name` carry the descriptive GTFS columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub location: GeoLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl Stop {
    /// Create a stop with no descriptive fields
    pub fn new(id: StopId, location: GeoLocation) -> Self {
        Self {
            id,
            location,
            code: None,
            name: String::new(),
        }
    }

    /// Set the public stop code
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the human readable name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Distance from this stop to `location` in kilometers
    #[must_use]
    pub fn distance_km(&self, location: &GeoLocation) -> f64 {
        self.location.distance_km(location)
    }
}
