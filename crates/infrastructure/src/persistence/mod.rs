//! Persistence module
//!
//! SQLite-based storage for the stop catalogue, accessed through a sqlx pool.

pub mod async_connection;
pub mod error;
pub mod stop_store;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use error::map_sqlx_error;
pub use stop_store::SqliteStopStore;
