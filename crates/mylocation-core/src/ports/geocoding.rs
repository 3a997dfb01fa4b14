use crate::models::{Coordinate, RequestId};

/// Port for reverse geocoding
///
/// The lookup is best effort. The answer comes back as a placemark list
/// tagged with the same `RequestId`, and may be empty or an error.
pub trait Geocoder {
    fn reverse_geocode(&self, request: RequestId, coordinate: Coordinate);
}
