use mylocation_core::error::{LocationError, Result};
use mylocation_core::models::Coordinate;

/// Validation result with details
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, reason: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(reason.into());
    }

    /// Convert into an `InvalidCoordinate` error for `coordinate` if invalid
    pub fn into_result(self, coordinate: Coordinate) -> Result<Coordinate> {
        if self.is_valid {
            Ok(coordinate)
        } else {
            Err(LocationError::InvalidCoordinate {
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
                reason: self.errors.join("; "),
            })
        }
    }
}

/// Validate a latitude/longitude pair
pub fn validate_coordinate(coordinate: &Coordinate) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !coordinate.latitude.is_finite() || !coordinate.longitude.is_finite() {
        result.add_error("Coordinates must be finite");
        return result;
    }

    if !(-90.0..=90.0).contains(&coordinate.latitude) {
        result.add_error(format!("Latitude {} outside [-90, 90]", coordinate.latitude));
    }

    if !(-180.0..=180.0).contains(&coordinate.longitude) {
        result.add_error(format!("Longitude {} outside [-180, 180]", coordinate.longitude));
    }

    result
}
