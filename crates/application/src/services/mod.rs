//! Application services
//!
//! Services orchestrate domain logic and coordinate between ports.

mod arrival_service;
mod prediction_summarizer;
mod stop_index;

pub use arrival_service::{ArrivalService, ArrivalSummary};
pub use prediction_summarizer::summarize;
pub use stop_index::{StopIndex, select_nearest};
