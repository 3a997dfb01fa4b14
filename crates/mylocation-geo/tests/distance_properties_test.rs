//! Property tests for distance computation

use mylocation_core::models::Coordinate;
use mylocation_geo::{geodesic_distance, haversine_distance, round_meters};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        let forward = geodesic_distance(&a, &b);
        let backward = geodesic_distance(&b, &a);
        prop_assert!((forward - backward).abs() < 1e-3);
    }

    #[test]
    fn distance_is_non_negative_and_bounded(a in coordinate(), b in coordinate()) {
        let meters = geodesic_distance(&a, &b);
        prop_assert!(meters >= 0.0);
        // Half the equatorial circumference
        prop_assert!(meters <= 20_040_000.0);
    }

    #[test]
    fn ellipsoid_and_sphere_agree_within_one_percent(a in coordinate(), b in coordinate()) {
        let ellipsoidal = geodesic_distance(&a, &b);
        let spherical = haversine_distance(&a, &b);
        prop_assume!(ellipsoidal > 1_000.0);
        prop_assert!((ellipsoidal - spherical).abs() / ellipsoidal < 0.01);
    }

    #[test]
    fn rounding_is_nearest_meter(meters in 0.0f64..1e7) {
        let rounded = round_meters(meters) as f64;
        prop_assert!((rounded - meters).abs() <= 0.5);
    }
}
