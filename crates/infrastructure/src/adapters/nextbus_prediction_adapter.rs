//! NextBus adapter - Implements PredictionFeedPort using integration_nextbus

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::PredictionFeedPort;
use async_trait::async_trait;
use domain::{MAX_PREDICTIONS, Prediction, PredictionQuery};
use integration_nextbus::{NextBusClient, NextBusConfig, NextBusError, PredictionClient};
use tracing::{debug, instrument};

/// Adapter for the NextBus prediction feed
pub struct NextBusPredictionAdapter {
    client: Arc<dyn PredictionClient>,
}

impl std::fmt::Debug for NextBusPredictionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NextBusPredictionAdapter")
            .field("client", &"PredictionClient")
            .finish()
    }
}

impl NextBusPredictionAdapter {
    /// Create an adapter around an existing client
    pub fn new(client: Arc<dyn PredictionClient>) -> Self {
        Self { client }
    }

    /// Build a [`NextBusClient`] from configuration and wrap it
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn from_config(config: &NextBusConfig) -> Result<Self, ApplicationError> {
        let client = NextBusClient::new(config).map_err(map_nextbus_error)?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Map a feed error to an application-layer error
pub fn map_nextbus_error(e: NextBusError) -> ApplicationError {
    match e {
        NextBusError::ParseError(msg) => ApplicationError::Parse(msg),
        NextBusError::InvalidQuery(msg) => ApplicationError::InvalidInput(msg),
        NextBusError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other if other.is_upstream_unavailable() => {
            ApplicationError::ExternalService(format!("NextBus unavailable: {other}"))
        },
        other => ApplicationError::Internal(other.to_string()),
    }
}

#[async_trait]
impl PredictionFeedPort for NextBusPredictionAdapter {
    #[instrument(skip(self, query), fields(route_tag = %query.route_tag, stop_id = %query.stop_id))]
    async fn fetch(&self, query: &PredictionQuery) -> Result<Vec<Prediction>, ApplicationError> {
        let response = self
            .client
            .fetch_predictions(query.route_tag.as_str(), query.stop_id.as_str())
            .await
            .map_err(map_nextbus_error)?;

        if let Some(ref message) = response.upstream_error {
            debug!(upstream_error = %message, "Feed returned no predictions");
        }

        let predictions: Vec<Prediction> = response
            .estimates
            .iter()
            .take(MAX_PREDICTIONS)
            .map(|estimate| Prediction::new(estimate.minutes, estimate.seconds))
            .collect();

        debug!(count = predictions.len(), "Fetched predictions");
        Ok(predictions)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use integration_nextbus::{ArrivalEstimate, PredictionsResponse};

    use super::*;

    struct StubClient {
        result: fn() -> Result<PredictionsResponse, NextBusError>,
        healthy: bool,
    }

    #[async_trait]
    impl PredictionClient for StubClient {
        async fn fetch_predictions(
            &self,
            _route_tag: &str,
            _stop_id: &str,
        ) -> Result<PredictionsResponse, NextBusError> {
            (self.result)()
        }

        async fn is_healthy(&self) -> bool {
            self.healthy
        }
    }

    fn adapter(result: fn() -> Result<PredictionsResponse, NextBusError>) -> NextBusPredictionAdapter {
        NextBusPredictionAdapter::new(Arc::new(StubClient {
            result,
            healthy: true,
        }))
    }

    fn query() -> PredictionQuery {
        PredictionQuery::new(
            domain::RouteTag::new("504").unwrap(),
            domain::StopId::new("14238").unwrap(),
        )
    }

    #[tokio::test]
    async fn converts_estimates_to_predictions() {
        let adapter = adapter(|| {
            Ok(PredictionsResponse {
                estimates: vec![
                    ArrivalEstimate {
                        minutes: 1,
                        seconds: 95,
                    },
                    ArrivalEstimate {
                        minutes: 8,
                        seconds: 12,
                    },
                ],
                ..Default::default()
            })
        });

        let predictions = adapter.fetch(&query()).await.unwrap();
        assert_eq!(
            predictions,
            vec![Prediction::new(1, 35), Prediction::new(8, 12)]
        );
        assert_eq!(predictions[0].seconds(), 35);
    }

    #[tokio::test]
    async fn empty_response_is_empty_list() {
        let adapter = adapter(|| Ok(PredictionsResponse::default()));
        assert!(adapter.fetch(&query()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn timeout_maps_to_external_service() {
        let adapter = adapter(|| Err(NextBusError::Timeout { timeout_secs: 5 }));
        let err = adapter.fetch(&query()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[tokio::test]
    async fn parse_error_maps_to_parse() {
        let adapter = adapter(|| Err(NextBusError::ParseError("eof".to_string())));
        let err = adapter.fetch(&query()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Parse(_)));
    }

    #[tokio::test]
    async fn availability_follows_client_health() {
        assert!(adapter(|| Ok(PredictionsResponse::default())).is_available().await);

        let unhealthy = NextBusPredictionAdapter::new(Arc::new(StubClient {
            result: || Ok(PredictionsResponse::default()),
            healthy: false,
        }));
        assert!(!unhealthy.is_available().await);
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            map_nextbus_error(NextBusError::ConnectionFailed("refused".into())),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            map_nextbus_error(NextBusError::RequestFailed("HTTP 500".into())),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            map_nextbus_error(NextBusError::InvalidQuery("empty".into())),
            ApplicationError::InvalidInput(_)
        ));
        assert!(matches!(
            map_nextbus_error(NextBusError::ConfigurationError("url".into())),
            ApplicationError::Configuration(_)
        ));
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let config = NextBusConfig {
            base_url: String::new(),
            ..Default::default()
        };
        let err = NextBusPredictionAdapter::from_config(&config).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }
}
