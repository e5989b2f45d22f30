//! NextBus publicXMLFeed client
//!
//! Issues one `command=predictions` request per lookup. No retries are made.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::NextBusConfig;
use crate::error::NextBusError;
use crate::models::PredictionsResponse;
use crate::parser::parse_predictions;

/// Trait for prediction feed clients
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Fetch predictions for `route_tag` at `stop_id`
    async fn fetch_predictions(
        &self,
        route_tag: &str,
        stop_id: &str,
    ) -> Result<PredictionsResponse, NextBusError>;

    /// Check if the feed is reachable
    async fn is_healthy(&self) -> bool;
}

/// Client for the NextBus XML feed
#[derive(Debug)]
pub struct NextBusClient {
    client: Client,
    config: NextBusConfig,
}

impl NextBusClient {
    /// Create a new NextBus client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NextBusConfig) -> Result<Self, NextBusError> {
        config.validate().map_err(NextBusError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| NextBusError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &NextBusConfig {
        &self.config
    }

    fn map_send_error(&self, e: &reqwest::Error) -> NextBusError {
        if e.is_timeout() {
            NextBusError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            NextBusError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl PredictionClient for NextBusClient {
    #[instrument(skip(self), fields(agency = %self.config.agency))]
    async fn fetch_predictions(
        &self,
        route_tag: &str,
        stop_id: &str,
    ) -> Result<PredictionsResponse, NextBusError> {
        let route_tag = route_tag.trim();
        let stop_id = stop_id.trim();
        if route_tag.is_empty() {
            return Err(NextBusError::InvalidQuery(
                "route tag must not be empty".to_string(),
            ));
        }
        if stop_id.is_empty() {
            return Err(NextBusError::InvalidQuery(
                "stop id must not be empty".to_string(),
            ));
        }

        let params = [
            ("command", "predictions"),
            ("a", self.config.agency.as_str()),
            ("r", route_tag),
            ("s", stop_id),
        ];

        debug!(url = %self.config.base_url, "Requesting predictions");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NextBusError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        debug!(bytes = body.len(), "Received predictions document");
        parse_predictions(&body)
    }

    async fn is_healthy(&self) -> bool {
        let params = [("command", "agencyList")];
        self.client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}
