use super::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation number of a distance check
///
/// Each new request receives the next value, so a stale reply can be told
/// apart from one addressed to the request currently in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a successful distance check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    pub request: RequestId,
    /// Device position the distance was measured from
    pub origin: Coordinate,
    pub target: Coordinate,
    pub meters: f64,
    pub rounded_meters: u64,
    pub place_label: String,
}
