use super::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// A pin on the map surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub coordinate: Coordinate,
    pub title: String,
}

impl Annotation {
    pub fn new(coordinate: Coordinate, title: impl Into<String>) -> Self {
        Self { coordinate, title: title.into() }
    }
}

/// Visible map viewport: a center and its extent in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinate,
    pub latitudinal_meters: f64,
    pub longitudinal_meters: f64,
}

impl Region {
    pub fn new(center: Coordinate, span_meters: f64) -> Self {
        Self { center, latitudinal_meters: span_meters, longitudinal_meters: span_meters }
    }
}
