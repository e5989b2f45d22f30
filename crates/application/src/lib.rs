//! Application layer - Use cases and orchestration
//!
//! Defines the ports through which stops and predictions are obtained and the
//! services that turn a caller location and route into an arrival sentence.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
