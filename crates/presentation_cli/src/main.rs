//! NearBus CLI
//!
//! Command-line interface for loading the stop catalogue and querying a
//! running server.

#![allow(clippy::print_stdout)]

mod stops;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// NearBus CLI
#[derive(Parser)]
#[command(name = "nearbus-cli")]
#[command(author, version, about = "NearBus next-arrival CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a GTFS stops.txt into the stop catalogue
    ///
    /// Rows whose stop_id is already stored are left untouched.
    /// Example: nearbus-cli import-stops --file ./gtfs/stops.txt
    ImportStops {
        /// Path to the GTFS stops.txt file
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the SQLite database
        #[arg(short, long, env = "NEARBUS_DATABASE__PATH", default_value = "nearbus.db")]
        database: PathBuf,
    },

    /// Find the stop nearest to a location
    Nearest {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Path to the SQLite database
        #[arg(short, long, env = "NEARBUS_DATABASE__PATH", default_value = "nearbus.db")]
        database: PathBuf,
    },

    /// Ask a running server for the next arrivals
    Arrival {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Route tag, e.g. 504
        #[arg(short, long)]
        route_tag: String,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Check server health
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::ImportStops { file, database } => {
            println!("Importing stops from {}", file.display());
            let report = stops::import_stops(&file, &database).await?;

            println!("Import complete ({})", database.display());
            println!("   inserted:        {}", report.inserted);
            println!("   already present: {}", report.already_present);
            println!("   duplicates:      {}", report.duplicates);
            println!("   invalid:         {}", report.invalid);
        },

        Commands::Nearest { lat, lon, database } => {
            let (stop, distance) = stops::nearest_stop(lat, lon, &database).await?;

            println!("{} {}", stop.id, stop.name);
            if let Some(code) = &stop.code {
                println!("   code:     {code}");
            }
            println!("   location: {}", stop.location);
            println!("   distance: {distance:.3} km");
        },

        Commands::Arrival {
            lat,
            lon,
            route_tag,
            url,
        } => {
            let resp = reqwest::Client::new()
                .get(endpoint_url(&url, "/"))
                .query(&[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("route_tag", route_tag),
                ])
                .send()
                .await
                .with_context(|| format!("Failed to reach {url}"))?;

            let status = resp.status();
            let body = resp.text().await?;
            if !status.is_success() {
                anyhow::bail!("Server returned HTTP {status}: {body}");
            }
            println!("{body}");
        },

        Commands::Health { url } => {
            match reqwest::Client::new()
                .get(endpoint_url(&url, "/health"))
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    let body = resp.json::<serde_json::Value>().await?;
                    println!("Healthy");
                    println!("{}", serde_json::to_string_pretty(&body)?);
                },
                Ok(resp) => {
                    println!("Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
