//! Geographic coordinate type and sanitization.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// Every constructor sanitizes: latitude is clamped to `[-90, 90]` and
/// longitude is wrapped into `[-180, 180]` (out-of-range values land in
/// `(-180, 180]`, so `181` becomes `-179` while an exact `180` or `-180`
/// is preserved).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// GeoJSON-ordered `[lng, lat]` wire literal, as the backend's map-center
/// endpoints produce it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat(pub f64, pub f64);

impl Coordinate {
    /// Build a sanitized coordinate from raw latitude/longitude degrees.
    #[must_use]
    pub fn sanitized(lat: f64, lng: f64) -> Self {
        Self {
            lat: lat.clamp(-90.0, 90.0),
            lng: wrap_lng(lng),
        }
    }

    /// Re-apply sanitization. Idempotent: already-sanitized coordinates
    /// come back unchanged.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self::sanitized(self.lat, self.lng)
    }

    /// `true` when both components are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Wrap a longitude into `[-180, 180]`.
///
/// In-range values (both endpoints included) pass through untouched;
/// out-of-range values are reduced modulo 360 into `(-180, 180]`.
fn wrap_lng(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// `(lat, lng)` tuple, the shape produced by map-library events.
impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::sanitized(lat, lng)
    }
}

/// GeoJSON `[lng, lat]` array order.
impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self::sanitized(lat, lng)
    }
}

impl From<LngLat> for Coordinate {
    fn from(lnglat: LngLat) -> Self {
        Self::sanitized(lnglat.1, lnglat.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_is_idempotent() {
        for (lat, lng) in [
            (0.0, 0.0),
            (95.0, 361.0),
            (-95.0, -361.0),
            (45.5, 179.9),
            (12.0, 540.0),
        ] {
            let once = Coordinate::sanitized(lat, lng);
            assert_eq!(once.sanitize(), once, "sanitize({lat}, {lng}) not idempotent");
        }
    }

    #[test]
    fn longitude_wrap_boundaries() {
        assert_eq!(Coordinate::sanitized(0.0, 180.0).lng, 180.0);
        assert_eq!(Coordinate::sanitized(0.0, 181.0).lng, -179.0);
        assert_eq!(Coordinate::sanitized(0.0, -180.0).lng, -180.0);
        assert_eq!(Coordinate::sanitized(0.0, -181.0).lng, 179.0);
    }

    #[test]
    fn latitude_clamps_to_poles() {
        assert_eq!(Coordinate::sanitized(95.0, 0.0).lat, 90.0);
        assert_eq!(Coordinate::sanitized(-95.0, 0.0).lat, -90.0);
    }

    #[test]
    fn full_wrap_returns_to_start() {
        let c = Coordinate::sanitized(10.0, 25.0 + 360.0);
        assert!((c.lng - 25.0).abs() < 1e-9);
    }

    #[test]
    fn geojson_array_order_is_lng_lat() {
        let c = Coordinate::from([-122.4194, 37.7749]);
        assert!((c.lat - 37.7749).abs() < 1e-9);
        assert!((c.lng - (-122.4194)).abs() < 1e-9);
    }

    #[test]
    fn tuple_order_is_lat_lng() {
        let c = Coordinate::from((37.7749, -122.4194));
        assert!((c.lat - 37.7749).abs() < 1e-9);
    }

    #[test]
    fn wire_literal_converts_and_sanitizes() {
        let c = Coordinate::from(LngLat(181.0, 95.0));
        assert_eq!(c.lat, 90.0);
        assert_eq!(c.lng, -179.0);
    }

    #[test]
    fn coordinate_serializes_as_named_fields() {
        let json = serde_json::to_value(Coordinate::sanitized(1.5, 2.5)).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 1.5, "lng": 2.5}));
    }
}
