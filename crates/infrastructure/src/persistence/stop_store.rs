//! SQLite stop store implementation
//!
//! Implements the `StopRepository` port over the `stops` table. Writes go
//! through `insert_all`, which the GTFS importer drives.

use application::{error::ApplicationError, ports::StopRepository};
use async_trait::async_trait;
use domain::{GeoLocation, Stop, StopId};
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

use super::error::map_sqlx_error;

const INSERT_STOP_SQL: &str = "INSERT INTO stops (stop_id, stop_code, stop_name, stop_lat, stop_lon) \
     VALUES ($1, $2, $3, $4, $5) \
     ON CONFLICT(stop_id) DO NOTHING";

/// SQLite-based stop catalogue
#[derive(Debug, Clone)]
pub struct SqliteStopStore {
    pool: SqlitePool,
}

impl SqliteStopStore {
    /// Create a new SQLite stop store
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert stops in one transaction, keeping rows whose id is already
    /// stored. Returns the number of rows written.
    #[instrument(skip(self, stops), fields(stops = stops.len()))]
    pub async fn insert_all(&self, stops: &[Stop]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for stop in stops {
            let result = sqlx::query(INSERT_STOP_SQL)
                .bind(stop.id.as_str())
                .bind(stop.code.as_deref())
                .bind(&stop.name)
                .bind(stop.location.latitude())
                .bind(stop.location.longitude())
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                debug!(stop_id = %stop.id, "Stop already stored");
            } else {
                inserted += 1;
            }
        }
        tx.commit().await?;

        debug!(inserted, "Stored stops");
        Ok(inserted)
    }
}

/// Row type for stop queries
#[derive(sqlx::FromRow)]
struct StopRow {
    stop_id: String,
    stop_code: Option<String>,
    stop_name: String,
    stop_lat: f64,
    stop_lon: f64,
}

impl StopRow {
    fn into_stop(self) -> Option<Stop> {
        let id = StopId::new(&self.stop_id).ok()?;
        let location = GeoLocation::new(self.stop_lat, self.stop_lon).ok()?;
        Some(Stop {
            id,
            location,
            code: self.stop_code,
            name: self.stop_name,
        })
    }
}

#[async_trait]
impl StopRepository for SqliteStopStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Stop>, ApplicationError> {
        let rows: Vec<StopRow> = sqlx::query_as(
            "SELECT stop_id, stop_code, stop_name, stop_lat, stop_lon \
             FROM stops ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let total = rows.len();
        let stops: Vec<Stop> = rows
            .into_iter()
            .filter_map(|row| {
                let stop_id = row.stop_id.clone();
                let stop = row.into_stop();
                if stop.is_none() {
                    warn!(stop_id = %stop_id, "Skipping stored stop with invalid data");
                }
                stop
            })
            .collect();

        debug!(total, usable = stops.len(), "Loaded stops");
        Ok(stops)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, ApplicationError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stops")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn is_available(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
