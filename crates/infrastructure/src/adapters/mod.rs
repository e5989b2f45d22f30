//! Adapters implementing application ports

mod nextbus_prediction_adapter;

pub use nextbus_prediction_adapter::{NextBusPredictionAdapter, map_nextbus_error};
