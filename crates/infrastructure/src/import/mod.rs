//! Bulk data import

mod gtfs_stops;

pub use gtfs_stops::{GtfsStopImporter, ImportError, ImportReport};
