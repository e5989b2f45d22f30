//! NearBus HTTP Server
//!
//! Main entry point for the arrival API.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{ArrivalService, StopRepository};
use infrastructure::{AppConfig, AsyncDatabase, NextBusPredictionAdapter, SqliteStopStore, init_telemetry};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    if let Err(errors) = config.validate() {
        anyhow::bail!("Invalid configuration: {}", errors.join("; "));
    }

    init_telemetry(&config.telemetry)?;
    info!("NearBus v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.path,
        agency = %config.nextbus.agency,
        "Configuration loaded"
    );

    let database = AsyncDatabase::new(&config.database.to_async_config())
        .await
        .context("Failed to open stop database")?;
    if config.database.run_migrations {
        database.migrate().await.context("Failed to run migrations")?;
    }

    let stops: Arc<dyn StopRepository> = Arc::new(SqliteStopStore::new(database.pool().clone()));
    match stops.count().await {
        Ok(0) => warn!("Stop catalogue is empty; run `nearbus-cli import-stops` first"),
        Ok(count) => info!(count, "Stop catalogue loaded"),
        Err(e) => warn!(error = %e, "Failed to count stops"),
    }

    let feed = NextBusPredictionAdapter::from_config(&config.nextbus)
        .context("Failed to initialize NextBus client")?;
    let arrival_service = ArrivalService::new(Arc::clone(&stops), Arc::new(feed));

    let state = AppState::new(Arc::new(arrival_service), stops);
    let app = routes::create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{addr}");

    // Draining connections is bounded by the shutdown timeout
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = drain_tx.send(());
    });
    let drain_deadline = async move {
        if drain_rx.await.is_ok() {
            info!("Waiting up to {:?} for connections to close", shutdown_timeout);
            tokio::time::sleep(shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server.into_future() => result?,
        () = drain_deadline => warn!("Connections still open after shutdown timeout"),
    }

    database.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
