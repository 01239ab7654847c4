//! Great-circle geometry on a unit sphere.
//!
//! Distances are central angles in radians, so they fall in `[0, π]`
//! regardless of any particular planet radius. Multiply by a radius if a
//! surface distance is ever needed.

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Build a validated point. Out-of-range input is a caller bug.
    pub fn new(lat: f64, lon: f64) -> Self {
        assert!((-90.0..=90.0).contains(&lat), "Latitude must be between -90 and 90");
        assert!((-180.0..=180.0).contains(&lon), "Longitude must be between -180 and 180");
        Self { lat, lon }
    }
}

/// Central angle between two points, via the haversine formula.
///
/// Returns exactly `0.0` for identical points and `π` for antipodal ones.
pub fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 near the antipode; asin would NaN.
    2.0 * h.min(1.0).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_for_identical_points() {
        let p = GeoPoint::new(48.8566, 2.3522);
        assert_eq!(central_angle(p, p), 0.0);
    }

    #[test]
    fn test_antipodal_maximum() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        assert_relative_eq!(central_angle(a, b), PI);
    }

    #[test]
    fn test_symmetry() {
        let a = GeoPoint::new(59.3293, 18.0686);
        let b = GeoPoint::new(-33.8688, 151.2093);
        assert_eq!(central_angle(a, b), central_angle(b, a));
    }

    #[test]
    fn test_quarter_circle() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(90.0, 0.0);
        assert_relative_eq!(central_angle(a, b), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_paris_to_london() {
        // ~344 km surface distance on a 6371 km sphere
        let paris = GeoPoint::new(48.8566, 2.3522);
        let london = GeoPoint::new(51.5074, -0.1278);
        let angle = central_angle(paris, london);
        assert!((angle * 6371.0 - 344.0).abs() < 5.0);
    }

    #[test]
    fn test_range_bounds() {
        let a = GeoPoint::new(89.9, 179.9);
        let b = GeoPoint::new(-89.9, -179.9);
        let angle = central_angle(a, b);
        assert!((0.0..=PI).contains(&angle));
    }

    #[test]
    #[should_panic]
    fn test_rejects_bad_latitude() {
        GeoPoint::new(91.0, 0.0);
    }
}
