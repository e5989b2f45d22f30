//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod route_tag;
mod stop_id;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use route_tag::RouteTag;
pub use stop_id::StopId;
