use geo::{Distance, Geodesic, Haversine, Point};
use mylocation_core::models::Coordinate;

fn to_point(coordinate: &Coordinate) -> Point {
    Point::new(coordinate.longitude, coordinate.latitude)
}

/// Geodesic distance in meters on the WGS 84 ellipsoid (Karney's algorithm)
pub fn geodesic_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    Geodesic.distance(to_point(from), to_point(to))
}

/// Great-circle distance in meters on a sphere of mean Earth radius
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    Haversine.distance(to_point(from), to_point(to))
}

/// Round a distance to whole meters for display
///
/// Negative and non-finite inputs clamp to zero.
pub fn round_meters(meters: f64) -> u64 {
    if meters.is_finite() && meters > 0.0 {
        meters.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seoul_city_hall_to_jongno() {
        let current = Coordinate::new(37.5665, 126.9780);
        let selected = Coordinate::new(37.5651, 126.9895);

        let meters = geodesic_distance(&current, &selected);

        assert!((meters - 1027.8).abs() < 1.0, "expected ~1027.8 m, got {}", meters);
        assert_eq!(round_meters(meters), 1028);
    }

    #[test]
    fn test_paris_london() {
        let paris = Coordinate::new(48.8566, 2.3522);
        let london = Coordinate::new(51.5074, -0.1276);

        let ellipsoidal = geodesic_distance(&paris, &london);
        let spherical = haversine_distance(&paris, &london);

        assert!((ellipsoidal - 343_916.0).abs() < 50.0, "got {}", ellipsoidal);
        assert!((spherical - 343_549.0).abs() < 500.0, "got {}", spherical);
    }

    #[test]
    fn test_same_point_is_zero() {
        let point = Coordinate::new(-8.5069, 115.2625);
        assert!(geodesic_distance(&point, &point) < 0.001);
    }

    #[test]
    fn test_round_meters() {
        assert_eq!(round_meters(1027.5), 1028);
        assert_eq!(round_meters(1027.49), 1027);
        assert_eq!(round_meters(-3.0), 0);
        assert_eq!(round_meters(f64::NAN), 0);
    }
}
