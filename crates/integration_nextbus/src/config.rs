//! NextBus feed configuration

use serde::{Deserialize, Serialize};

/// Configuration for the NextBus prediction feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextBusConfig {
    /// Feed endpoint, queried with `command=predictions`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Agency tag sent as the `a` parameter
    #[serde(default = "default_agency")]
    pub agency: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://webservices.nextbus.com/service/publicXMLFeed".to_string()
}

fn default_agency() -> String {
    "ttc".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    concat!("NearBus/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for NextBusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            agency: default_agency(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl NextBusConfig {
    /// Create a configuration pointing at a local mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("base_url must start with http:// or https://".to_string());
        }

        if self.agency.trim().is_empty() {
            return Err("agency must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
