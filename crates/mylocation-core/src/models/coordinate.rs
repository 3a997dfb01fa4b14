//! Coordinates and device fixes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS 84 latitude/longitude pair in degrees
///
/// Construction does not validate the range; see `mylocation_geo::validation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A device location fix reported by the positioning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinate: Coordinate,
    /// Radius of uncertainty in meters, when the platform reports one
    pub horizontal_accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// A fix taken now with no accuracy estimate
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate, horizontal_accuracy: None, timestamp: Utc::now() }
    }

    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.horizontal_accuracy = Some(meters);
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
