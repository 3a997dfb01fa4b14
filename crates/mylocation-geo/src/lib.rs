//! MyLocation Geo - Coordinate validation and surface distances
//!
//! Distances are computed on the WGS 84 ellipsoid via the `geo` crate.

pub mod distance;
pub mod validation;

pub use distance::{geodesic_distance, haversine_distance, round_meters};
pub use validation::{validate_coordinate, ValidationResult};
