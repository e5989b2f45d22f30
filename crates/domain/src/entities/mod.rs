//! Domain entities - Objects with identity and lifecycle

mod prediction;
mod stop;

pub use prediction::{MAX_PREDICTIONS, Prediction, PredictionQuery};
pub use stop::Stop;
