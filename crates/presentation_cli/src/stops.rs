//! Local stop catalogue commands
//!
//! Opens the SQLite catalogue directly, without a running server.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use application::StopIndex;
use domain::{GeoLocation, Stop};
use infrastructure::{
    AsyncDatabase, AsyncDatabaseConfig, GtfsStopImporter, ImportReport, SqliteStopStore,
};
use tracing::info;

/// Open the catalogue at `path`, creating and migrating it if needed
pub async fn open_database(path: &Path) -> Result<AsyncDatabase> {
    let db = AsyncDatabase::new(&AsyncDatabaseConfig::file(path))
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    db.migrate().await.context("Failed to run migrations")?;
    Ok(db)
}

/// Load a GTFS `stops.txt` into the catalogue
pub async fn import_stops(file: &Path, database: &Path) -> Result<ImportReport> {
    let db = open_database(database).await?;
    let report = GtfsStopImporter::new(db.pool().clone())
        .import_file(file)
        .await
        .with_context(|| format!("Failed to import {}", file.display()))?;
    db.close().await;

    info!(rows = report.rows(), "Import finished");
    Ok(report)
}

/// Find the stop closest to `lat`/`lon`, with its distance in kilometres
pub async fn nearest_stop(lat: f64, lon: f64, database: &Path) -> Result<(Stop, f64)> {
    let location = GeoLocation::new(lat, lon)?;
    let db = open_database(database).await?;
    let index = StopIndex::new(Arc::new(SqliteStopStore::new(db.pool().clone())));

    let stop = index.nearest(&location).await?;
    let distance = stop.distance_km(&location);
    db.close().await;

    Ok((stop, distance))
}
