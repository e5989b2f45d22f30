//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite stop store,
//! the NextBus prediction adapter, the GTFS importer, configuration loading
//! and tracing setup.

pub mod adapters;
pub mod config;
pub mod import;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use import::{GtfsStopImporter, ImportError, ImportReport};
pub use persistence::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, SqliteStopStore};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
