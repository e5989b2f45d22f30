//! Logging and tracing setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! human-readable or a JSON formatter.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
