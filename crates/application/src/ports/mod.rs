//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod prediction_feed_port;
mod stop_repository;

#[cfg(test)]
pub use prediction_feed_port::MockPredictionFeedPort;
pub use prediction_feed_port::PredictionFeedPort;
#[cfg(test)]
pub use stop_repository::MockStopRepository;
pub use stop_repository::StopRepository;
