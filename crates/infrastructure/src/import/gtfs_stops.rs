//! GTFS `stops.txt` importer
//!
//! Loads the stop catalogue from a GTFS feed's `stops.txt` into the `stops`
//! table. The whole file is written in one transaction, so a failed import
//! leaves the table untouched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use domain::{GeoLocation, Stop, StopId};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use crate::persistence::SqliteStopStore;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors that abort an import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed stops file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows written to the table
    pub inserted: u64,
    /// Rows whose `stop_id` appeared earlier in the same file
    pub duplicates: u64,
    /// Rows with a missing id or unusable coordinates
    pub invalid: u64,
    /// Rows whose `stop_id` was already stored
    pub already_present: u64,
}

impl ImportReport {
    /// Number of data rows read from the file
    #[must_use]
    pub const fn rows(&self) -> u64 {
        self.inserted + self.duplicates + self.invalid + self.already_present
    }
}

/// Raw `stops.txt` row; unknown GTFS columns are ignored
#[derive(Debug, Deserialize)]
struct StopRecord {
    #[serde(default)]
    stop_id: String,
    #[serde(default)]
    stop_code: Option<String>,
    #[serde(default)]
    stop_name: Option<String>,
    #[serde(default)]
    stop_lat: String,
    #[serde(default)]
    stop_lon: String,
}

/// Imports GTFS stops into SQLite
#[derive(Debug, Clone)]
pub struct GtfsStopImporter {
    pool: SqlitePool,
}

impl GtfsStopImporter {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Import a `stops.txt` file from disk
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn import_file(&self, path: &Path) -> Result<ImportReport, ImportError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_bytes(&bytes).await
    }

    /// Import `stops.txt` content already held in memory
    pub async fn import_bytes(&self, bytes: &[u8]) -> Result<ImportReport, ImportError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let (stops, mut report) = parse_records(bytes)?;

        let inserted = SqliteStopStore::new(self.pool.clone())
            .insert_all(&stops)
            .await?;
        report.inserted = inserted;
        report.already_present = stops.len() as u64 - inserted;

        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            invalid = report.invalid,
            already_present = report.already_present,
            "Stop import complete"
        );
        Ok(report)
    }
}

/// Validate rows, dropping in-file duplicates and unusable entries
fn parse_records(bytes: &[u8]) -> Result<(Vec<Stop>, ImportReport), ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let mut report = ImportReport::default();
    let mut seen = HashSet::new();
    let mut stops = Vec::new();

    for (index, record) in reader.deserialize::<StopRecord>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(line, error = %e, "Skipping unreadable row");
                report.invalid += 1;
                continue;
            },
        };

        let Ok(id) = StopId::new(&record.stop_id) else {
            warn!(line, "Skipping row without stop_id");
            report.invalid += 1;
            continue;
        };

        if !seen.insert(id.as_str().to_string()) {
            debug!(line, stop_id = %id, "Skipping duplicate stop_id");
            report.duplicates += 1;
            continue;
        }

        let Some(location) = parse_location(&record.stop_lat, &record.stop_lon) else {
            warn!(
                line,
                stop_id = %id,
                lat = %record.stop_lat,
                lon = %record.stop_lon,
                "Skipping row with invalid coordinates"
            );
            report.invalid += 1;
            continue;
        };

        let mut stop = Stop::new(id, location).with_name(record.stop_name.unwrap_or_default());
        if let Some(code) = record.stop_code.filter(|c| !c.is_empty()) {
            stop = stop.with_code(code);
        }
        stops.push(stop);
    }

    Ok((stops, report))
}

fn parse_location(lat: &str, lon: &str) -> Option<GeoLocation> {
    let lat: f64 = lat.parse().ok()?;
    let lon: f64 = lon.parse().ok()?;
    GeoLocation::new(lat, lon).ok()
}
