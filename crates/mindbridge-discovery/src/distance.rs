//! Great-circle distance between coordinates.

use mindbridge_core::types::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two coordinates, in kilometers.
///
/// Always `>= 0`, zero for identical points and symmetric in its arguments.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [
            Coordinate::DOWNTOWN_TORONTO,
            coord(0.0, 0.0),
            coord(-33.8688, 151.2093),
            coord(90.0, 180.0),
        ];
        for p in points {
            assert_eq!(distance_km(p, p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::DOWNTOWN_TORONTO;
        let b = coord(43.6577, -79.4103);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn test_distance_grows_with_separation() {
        let origin = Coordinate::DOWNTOWN_TORONTO;
        let near = coord(43.6566, -79.3859);
        let mid = coord(43.6577, -79.4103);
        let far = coord(45.4215, -75.6972);
        let d_near = distance_km(origin, near);
        let d_mid = distance_km(origin, mid);
        let d_far = distance_km(origin, far);
        assert!(d_near > 0.0);
        assert!(d_near < d_mid);
        assert!(d_mid < d_far);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_km(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn test_antipodal_points_are_half_circumference() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1e-6);
        assert!(!d.is_nan());
    }
}
