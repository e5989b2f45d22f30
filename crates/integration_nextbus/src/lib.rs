//! NextBus prediction feed integration for NearBus
//!
//! Fetches real-time arrival predictions from the NextBus
//! [publicXMLFeed](https://webservices.nextbus.com/service/publicXMLFeed)
//! and reduces the loosely shaped XML document to at most two arrival
//! estimates.
//!
//! # Architecture
//!
//! [`PredictionClient`] defines the interface, implemented by
//! [`NextBusClient`]. Parsing is a pure function ([`parse_predictions`]) so it
//! can be exercised without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_nextbus::{NextBusClient, NextBusConfig, PredictionClient};
//!
//! let client = NextBusClient::new(&NextBusConfig::default())?;
//! let response = client.fetch_predictions("504", "14238").await?;
//! for estimate in &response.estimates {
//!     println!("{} min {} s", estimate.minutes, estimate.seconds);
//! }
//! ```

mod client;
mod config;
mod error;
mod models;
mod parser;

pub use client::{NextBusClient, PredictionClient};
pub use config::NextBusConfig;
pub use error::NextBusError;
pub use models::{ArrivalEstimate, MAX_ESTIMATES, PER_DIRECTION_LIMIT, PredictionsResponse};
pub use parser::parse_predictions;
