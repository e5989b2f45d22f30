//! Next-arrival handler

use axum::extract::{Query, State, rejection::QueryRejection};
use domain::{GeoLocation, RouteTag};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Raw query string; every field is validated by hand so that any defect
/// yields the same 400 response
#[derive(Debug, Default, Deserialize)]
pub struct ArrivalParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub route_tag: Option<String>,
}

impl ArrivalParams {
    /// Validate into a location and route tag
    pub fn parse(&self) -> Result<(GeoLocation, RouteTag), ApiError> {
        let lat = parse_coordinate(self.lat.as_deref(), "lat")?;
        let lon = parse_coordinate(self.lon.as_deref(), "lon")?;
        let location =
            GeoLocation::new(lat, lon).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let route_tag = RouteTag::new(self.route_tag.as_deref().unwrap_or_default())
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok((location, route_tag))
    }
}

fn parse_coordinate(raw: Option<&str>, name: &str) -> Result<f64, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest(format!("{name} is missing")))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ApiError::BadRequest(format!("{name} is not a number: {raw}")))
}

/// `GET /?lat=..&lon=..&route_tag=..`
///
/// Answers with a plain-text sentence describing the next arrivals of the
/// route at the stop nearest to the caller.
#[instrument(skip(state, params))]
pub async fn next_arrival(
    State(state): State<AppState>,
    params: Result<Query<ArrivalParams>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (location, route_tag) = params.parse()?;

    let summary = state
        .arrival_service
        .next_arrival(&location, &route_tag)
        .await?;

    Ok(summary.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lat: Option<&str>, lon: Option<&str>, route_tag: Option<&str>) -> ArrivalParams {
        ArrivalParams {
            lat: lat.map(String::from),
            lon: lon.map(String::from),
            route_tag: route_tag.map(String::from),
        }
    }

    #[test]
    fn parses_valid_params() {
        let (location, route_tag) = params(Some("43.6441"), Some(" -79.4005 "), Some("504"))
            .parse()
            .unwrap();
        assert!((location.latitude() - 43.6441).abs() < f64::EPSILON);
        assert!((location.longitude() + 79.4005).abs() < f64::EPSILON);
        assert_eq!(route_tag.as_str(), "504");
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(params(None, Some("1"), Some("504")).parse().is_err());
        assert!(params(Some("1"), None, Some("504")).parse().is_err());
        assert!(params(Some("1"), Some("1"), None).parse().is_err());
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        assert!(params(Some("north"), Some("1"), Some("504")).parse().is_err());
        assert!(params(Some(""), Some("1"), Some("504")).parse().is_err());
    }

    #[test]
    fn rejects_non_finite_and_out_of_range() {
        assert!(params(Some("NaN"), Some("1"), Some("504")).parse().is_err());
        assert!(params(Some("1"), Some("inf"), Some("504")).parse().is_err());
        assert!(params(Some("90.5"), Some("1"), Some("504")).parse().is_err());
        assert!(params(Some("1"), Some("-180.1"), Some("504")).parse().is_err());
    }

    #[test]
    fn rejects_blank_route_tag() {
        assert!(params(Some("1"), Some("1"), Some("   ")).parse().is_err());
    }
}
