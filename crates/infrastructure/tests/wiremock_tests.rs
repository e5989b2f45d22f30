//! End-to-end tests: SQLite stops plus a mocked NextBus feed

use std::sync::Arc;

use application::{ApplicationError, ArrivalService, PredictionFeedPort};
use domain::{GeoLocation, PredictionQuery, RouteTag, StopId};
use infrastructure::{AsyncDatabase, GtfsStopImporter, NextBusPredictionAdapter, SqliteStopStore};
use integration_nextbus::NextBusConfig;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STOPS_TXT: &str = "stop_id,stop_name,stop_lat,stop_lon\n\
    14238,King St West At Spadina Ave,43.644,-79.395\n\
    3001,Union Station,43.6453,-79.3806\n";

fn predictions_xml(entries: &[(u32, u32)]) -> String {
    let predictions: String = entries
        .iter()
        .map(|(m, s)| format!(r#"<prediction minutes="{m}" seconds="{s}" isDeparture="false"/>"#))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<body copyright="All data copyright Toronto Transit Commission 2026.">
  <predictions routeTitle="504-King" stopTitle="King St West At Spadina Ave">
    <direction title="East">{predictions}</direction>
  </predictions>
</body>"#
    )
}

async fn service_for(server: &MockServer) -> ArrivalService {
    let db = AsyncDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    GtfsStopImporter::new(db.pool().clone())
        .import_bytes(STOPS_TXT.as_bytes())
        .await
        .unwrap();

    let adapter = NextBusPredictionAdapter::from_config(&NextBusConfig::for_testing(server.uri()))
        .unwrap();
    ArrivalService::new(
        Arc::new(SqliteStopStore::new(db.pool().clone())),
        Arc::new(adapter),
    )
}

fn spadina() -> GeoLocation {
    GeoLocation::new(43.6441, -79.3951).unwrap()
}

#[tokio::test]
async fn test_arrival_with_two_predictions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("command", "predictions"))
        .and(query_param("r", "504"))
        .and(query_param("s", "14238"))
        .respond_with(ResponseTemplate::new(200).set_body_string(predictions_xml(&[
            (3, 12),
            (11, 5),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let summary = service
        .next_arrival(&spadina(), &RouteTag::new("504").unwrap())
        .await
        .unwrap();

    assert_eq!(summary.stop_id.as_str(), "14238");
    assert_eq!(
        summary.message,
        "Bus 504 is arriving in 3 minutes, followed by another bus in 11."
    );
}

#[tokio::test]
async fn test_arrival_with_single_prediction() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(predictions_xml(&[(4, 277)])))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let summary = service
        .next_arrival(&spadina(), &RouteTag::new("504").unwrap())
        .await
        .unwrap();

    assert_eq!(
        summary.message,
        "Bus 504 is arriving in 4 minutes and 37 seconds."
    );
}

#[tokio::test]
async fn test_arrival_without_predictions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<body><Error shouldRetry="false">Could not get route "999".</Error></body>"#,
        ))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let summary = service
        .next_arrival(&spadina(), &RouteTag::new("999").unwrap())
        .await
        .unwrap();

    assert!(summary.predictions.is_empty());
    assert_eq!(
        summary.message,
        "No arrival time predictions available for route 999."
    );
}

#[tokio::test]
async fn test_upstream_failure_is_external_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let err = service
        .next_arrival(&spadina(), &RouteTag::new("504").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_upstream_unavailable());
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_malformed_feed_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body><predictions"))
        .mount(&server)
        .await;

    let adapter = NextBusPredictionAdapter::from_config(&NextBusConfig::for_testing(server.uri()))
        .unwrap();
    let query = PredictionQuery::new(RouteTag::new("504").unwrap(), StopId::new("1").unwrap());
    let err = adapter.fetch(&query).await.unwrap_err();

    assert!(matches!(err, ApplicationError::Parse(_)));
}

#[tokio::test]
async fn test_adapter_availability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("command", "agencyList"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body></body>"))
        .mount(&server)
        .await;

    let adapter = NextBusPredictionAdapter::from_config(&NextBusConfig::for_testing(server.uri()))
        .unwrap();
    assert!(adapter.is_available().await);
}
