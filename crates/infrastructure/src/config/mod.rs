//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//!
//! The NextBus feed and telemetry sections reuse the configuration types of
//! the crates that consume them.
//!
//! Sources in increasing precedence: built-in defaults, an optional
//! `config.toml` in the working directory, then `NEARBUS_`-prefixed
//! environment variables with `__` between nested keys
//! (e.g. `NEARBUS_DATABASE__PATH=/var/lib/nearbus/stops.db`).

mod database;
mod server;

use std::path::Path;

use integration_nextbus::NextBusConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "NEARBUS";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// NextBus prediction feed
    #[serde(default)]
    pub nextbus: NextBusConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(Path::new("config"), env_source())
    }

    /// Load configuration from an explicit file and environment source
    ///
    /// The file is optional; its format is inferred from the extension, or
    /// probed when `file` has none.
    pub fn load_with(
        file: &Path,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(env);

        builder.build()?.try_deserialize()
    }

    /// Validate the configuration, collecting every problem found
    ///
    /// # Errors
    ///
    /// Returns the list of problems if any setting is unusable.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }
        if self.server.request_timeout_secs == 0 {
            errors.push("server.request_timeout_secs must be greater than 0".to_string());
        }

        if self.database.path.trim().is_empty() {
            errors.push("database.path must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            errors.push("database.max_connections must be greater than 0".to_string());
        }

        if self.server.request_timeout_secs > 0
            && self.server.request_timeout_secs <= self.nextbus.timeout_secs
        {
            errors.push(format!(
                "server.request_timeout_secs ({}) must exceed nextbus.timeout_secs ({})",
                self.server.request_timeout_secs, self.nextbus.timeout_secs
            ));
        }

        if let Err(e) = self.nextbus.validate() {
            errors.push(format!("nextbus.{e}"));
        }

        if let Err(e) = EnvFilter::try_new(&self.telemetry.log_filter) {
            errors.push(format!("telemetry.log_filter is invalid: {e}"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Environment source with the `NEARBUS_` prefix and `__` key separator
#[must_use]
pub fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        env_source().source(Some(map))
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "nearbus.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.run_migrations);
        assert_eq!(config.nextbus.agency, "ttc");
        assert_eq!(config.nextbus.timeout_secs, 5);
        assert!(!config.telemetry.json_logs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_with(&dir.path().join("missing.toml"), env_from(&[])).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.nextbus.agency, "ttc");
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[database]
path = "/tmp/stops.db"

[nextbus]
agency = "sf-muni"
"#
        )
        .unwrap();

        let config = AppConfig::load_with(&path, env_from(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, "/tmp/stops.db");
        assert_eq!(config.nextbus.agency, "sf-muni");
        assert_eq!(config.nextbus.timeout_secs, 5);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();

        let env = env_from(&[
            ("NEARBUS_SERVER__PORT", "9090"),
            ("NEARBUS_NEXTBUS__BASE_URL", "http://localhost:1234/feed"),
            ("NEARBUS_TELEMETRY__JSON_LOGS", "true"),
        ]);
        let config = AppConfig::load_with(&path, env).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.nextbus.base_url, "http://localhost:1234/feed");
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn validate_collects_all_errors() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 0;
        config.database.max_connections = 0;
        config.nextbus.timeout_secs = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.starts_with("nextbus.")));
    }

    #[test]
    fn validate_requires_request_timeout_above_feed_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 2;
        config.nextbus.timeout_secs = 5;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("request_timeout_secs"));

        config.server.request_timeout_secs = 5;
        assert!(config.validate().is_err());

        config.server.request_timeout_secs = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_log_filter() {
        let mut config = AppConfig::default();
        config.telemetry.log_filter = "nearbus=notalevel".to_string();
        let errors = config.validate().unwrap_err();
        assert!(errors[0].contains("log_filter"));
    }

    #[test]
    fn memory_database_config() {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
            ..Default::default()
        };
        assert_eq!(config.to_async_config().url, "sqlite::memory:");
    }

    #[test]
    fn file_database_config() {
        let config = DatabaseConfig {
            path: "data/stops.db".to_string(),
            max_connections: 8,
            run_migrations: true,
        };
        let async_config = config.to_async_config();
        assert_eq!(async_config.url, "sqlite:data/stops.db");
        assert_eq!(async_config.max_connections, 8);
        assert!(async_config.wal_mode);
    }

    #[test]
    fn bind_address() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            ..Default::default()
        };
        assert_eq!(server.bind_address(), "0.0.0.0:8000");
    }
}
