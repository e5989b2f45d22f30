//! NextBus predictions document parser
//!
//! The feed reports `<predictions>`, `<direction>` and `<prediction>` as a
//! single element or as a run of repeated elements depending on how many
//! exist upstream. Every repeated element is read through [`into_sequence`]
//! so the extraction logic only ever sees a `Vec`.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace, warn};

use crate::error::NextBusError;
use crate::models::{ArrivalEstimate, MAX_ESTIMATES, PER_DIRECTION_LIMIT, PredictionsResponse};

/// Parse a NextBus `predictions` document
///
/// Only the first `<predictions>` node is read. Each of its directions
/// contributes its first [`PER_DIRECTION_LIMIT`] entries, entries without
/// numeric `minutes` and `seconds` attributes are dropped, and the survivors
/// are capped at [`MAX_ESTIMATES`].
///
/// A document that is well formed but lacks the expected nodes, or carries an
/// upstream `<Error>`, yields an empty response.
///
/// # Errors
///
/// Returns `NextBusError::ParseError` if the body is not well-formed XML or
/// contains no element at all.
pub fn parse_predictions(xml: &str) -> Result<PredictionsResponse, NextBusError> {
    check_well_formed(xml)?;

    let body: RawBody = match quick_xml::de::from_str(xml) {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Predictions document has an unexpected shape");
            return Ok(PredictionsResponse::default());
        },
    };

    if let Some(error) = body.errors.into_iter().next() {
        let message = error.message.trim().to_string();
        warn!(
            upstream_error = %message,
            should_retry = ?error.should_retry,
            "NextBus returned an error document"
        );
        return Ok(PredictionsResponse {
            upstream_error: Some(message),
            ..Default::default()
        });
    }

    let Some(node) = body.predictions.into_iter().next() else {
        debug!("Document has no predictions node");
        return Ok(PredictionsResponse::default());
    };

    if node.directions.is_empty() {
        debug!(
            reason = node.dir_title_because_no_predictions.as_deref().unwrap_or("none"),
            "Predictions node has no direction"
        );
    }

    let mut estimates: Vec<ArrivalEstimate> = node
        .directions
        .iter()
        .flat_map(|direction| {
            direction
                .predictions
                .iter()
                .take(PER_DIRECTION_LIMIT)
                .filter_map(move |raw| {
                    let estimate = raw.estimate();
                    if estimate.is_none() {
                        trace!(
                            direction = direction.title.as_deref().unwrap_or(""),
                            minutes = ?raw.minutes,
                            seconds = ?raw.seconds,
                            "Dropping malformed prediction"
                        );
                    }
                    estimate
                })
        })
        .collect();
    estimates.truncate(MAX_ESTIMATES);

    Ok(PredictionsResponse {
        route_title: node.route_title,
        stop_title: node.stop_title,
        estimates,
        upstream_error: None,
    })
}

/// Reject input that is not a complete XML document
fn check_well_formed(xml: &str) -> Result<(), NextBusError> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut saw_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                saw_element = true;
            },
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Empty(_)) => saw_element = true,
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => {
                return Err(NextBusError::ParseError(format!(
                    "malformed XML at position {}: {e}",
                    reader.error_position()
                )));
            },
        }
    }

    if !saw_element {
        return Err(NextBusError::ParseError(
            "document contains no elements".to_string(),
        ));
    }
    if depth != 0 {
        return Err(NextBusError::ParseError(
            "unexpected end of document".to_string(),
        ));
    }
    Ok(())
}

/// Read one element or a run of repeated elements as a `Vec`
///
/// Combined with `#[serde(default)]`, an absent element becomes an empty
/// `Vec` as well.
fn into_sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Vec::<T>::deserialize(deserializer)
}

// --- Raw feed types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawBody {
    #[serde(rename = "predictions", default, deserialize_with = "into_sequence")]
    predictions: Vec<RawPredictions>,
    #[serde(rename = "Error", default, deserialize_with = "into_sequence")]
    errors: Vec<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawPredictions {
    #[serde(rename = "@routeTitle", default)]
    route_title: Option<String>,
    #[serde(rename = "@stopTitle", default)]
    stop_title: Option<String>,
    #[serde(rename = "@dirTitleBecauseNoPredictions", default)]
    dir_title_because_no_predictions: Option<String>,
    #[serde(rename = "direction", default, deserialize_with = "into_sequence")]
    directions: Vec<RawDirection>,
}

#[derive(Debug, Deserialize)]
struct RawDirection {
    #[serde(rename = "@title", default)]
    title: Option<String>,
    #[serde(rename = "prediction", default, deserialize_with = "into_sequence")]
    predictions: Vec<RawPrediction>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    #[serde(rename = "@minutes", default)]
    minutes: Option<String>,
    #[serde(rename = "@seconds", default)]
    seconds: Option<String>,
}

impl RawPrediction {
    fn estimate(&self) -> Option<ArrivalEstimate> {
        let minutes = self.minutes.as_deref()?.trim().parse().ok()?;
        let seconds = self.seconds.as_deref()?.trim().parse().ok()?;
        Some(ArrivalEstimate { minutes, seconds })
    }
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(rename = "@shouldRetry", default)]
    should_retry: Option<String>,
    #[serde(rename = "$text", default)]
    message: String,
}
