//! Prediction data models
//!
//! Typed results of a NextBus `predictions` request, independent of the XML
//! shape they were read from.

use serde::{Deserialize, Serialize};

/// Number of entries taken from each `<direction>` before validation
pub const PER_DIRECTION_LIMIT: usize = 2;

/// Maximum number of estimates returned for one request
pub const MAX_ESTIMATES: usize = 2;

/// One upstream arrival estimate
///
/// `seconds` is reported exactly as the feed sent it and may be the total
/// number of seconds rather than the remainder within the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalEstimate {
    pub minutes: u32,
    pub seconds: u32,
}

/// Parsed result of a `predictions` request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionsResponse {
    /// Route title of the first `<predictions>` node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_title: Option<String>,
    /// Stop title of the first `<predictions>` node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_title: Option<String>,
    /// Valid estimates in document order, at most [`MAX_ESTIMATES`]
    pub estimates: Vec<ArrivalEstimate>,
    /// Message of an upstream `<Error>` element, if one was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_error: Option<String>,
}

impl PredictionsResponse {
    /// Whether the feed produced no usable estimates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let response = PredictionsResponse::default();
        assert!(response.is_empty());
        assert!(response.upstream_error.is_none());
    }

    #[test]
    fn test_serialization_skips_missing_titles() {
        let response = PredictionsResponse {
            estimates: vec![ArrivalEstimate {
                minutes: 3,
                seconds: 12,
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("stop_title"));
        assert!(json.contains("\"minutes\":3"));
    }
}
