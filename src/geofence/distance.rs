//! Great-circle distance between coordinates.

use crate::models::Coordinate;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Returns the haversine distance between two coordinates in meters.
///
/// Inputs are not range-checked; callers validate coordinates at the
/// boundary. The result is symmetric in its arguments and zero for
/// identical points.
///
/// # Example
///
/// ```
/// use shift_tracker::geofence::haversine_distance;
/// use shift_tracker::models::Coordinate;
///
/// let london = Coordinate::new(51.5074, -0.1278);
/// let paris = Coordinate::new(48.8566, 2.3522);
/// let meters = haversine_distance(&london, &paris);
/// assert!((meters - 343_556.0).abs() < 1.0);
/// ```
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1 for antipodal points.
    2.0 * EARTH_RADIUS_METERS * h.clamp(0.0, 1.0).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE_METERS: f64 = 1e-6;

    #[test]
    fn test_same_point_is_zero() {
        let nyc = Coordinate::new(40.7128, -74.0060);
        assert_eq!(haversine_distance(&nyc, &nyc), 0.0);
    }

    #[test]
    fn test_known_distance_north_of_nyc() {
        let center = Coordinate::new(40.7128, -74.0060);
        let north = Coordinate::new(40.7182, -74.0060);
        let meters = haversine_distance(&center, &north);
        assert!((meters - 600.45).abs() < 0.01, "got {}", meters);
    }

    #[test]
    fn test_half_circumference_along_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((haversine_distance(&a, &b) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_accuracy_does_not_affect_distance() {
        let a = Coordinate::new(10.0, 10.0);
        let b = Coordinate::new(10.001, 10.0);
        let a_fuzzy = a.with_accuracy(25.0);
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&a_fuzzy, &b));
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(a in coordinate(), b in coordinate()) {
            let ab = haversine_distance(&a, &b);
            let ba = haversine_distance(&b, &a);
            prop_assert!((ab - ba).abs() < TOLERANCE_METERS, "{} vs {}", ab, ba);
        }

        #[test]
        fn prop_distance_to_self_is_zero(a in coordinate()) {
            prop_assert_eq!(haversine_distance(&a, &a), 0.0);
        }

        #[test]
        fn prop_distance_is_bounded(a in coordinate(), b in coordinate()) {
            let d = haversine_distance(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_METERS + TOLERANCE_METERS);
        }
    }
}
