//! Domain layer for NearBus
//!
//! Contains the core vocabulary of the arrival lookup: coordinates, stops,
//! route tags, and arrival predictions. This layer has no I/O and defines the
//! ubiquitous language shared by every other crate.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
