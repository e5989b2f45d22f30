//! Arrival sentence rendering

use domain::Prediction;

/// Render predictions for `route_tag` as a single sentence
///
/// Only the first two predictions are used.
pub fn summarize(route_tag: &str, predictions: &[Prediction]) -> String {
    match predictions {
        [] => format!("No arrival time predictions available for route {route_tag}."),
        [only] => format!(
            "Bus {route_tag} is arriving in {} minutes and {} seconds.",
            only.minutes(),
            only.seconds()
        ),
        [first, second, ..] => format!(
            "Bus {route_tag} is arriving in {} minutes, followed by another bus in {}.",
            first.minutes(),
            second.minutes()
        ),
    }
}
