//! Application state shared across handlers

use std::sync::Arc;

use application::{ArrivalService, StopRepository};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Nearest-stop lookup plus prediction fetch
    pub arrival_service: Arc<ArrivalService>,
    /// Stop catalogue, used by readiness checks
    pub stops: Arc<dyn StopRepository>,
}

impl AppState {
    pub fn new(arrival_service: Arc<ArrivalService>, stops: Arc<dyn StopRepository>) -> Self {
        Self {
            arrival_service,
            stops,
        }
    }
}
