//! Viewport bounds and great-circle distance math.

use crate::coord::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A rectangular viewport in geographic coordinates, southwest/northeast
/// corners. Derived from the map library's current view on every settle
/// event; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub sw: Coordinate,
    pub ne: Coordinate,
}

impl Bounds {
    /// Build bounds from corner coordinates, sanitizing both.
    #[must_use]
    pub fn new(sw: Coordinate, ne: Coordinate) -> Self {
        Self {
            sw: sw.sanitize(),
            ne: ne.sanitize(),
        }
    }

    /// Geographic midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::sanitized(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lng + self.ne.lng) / 2.0,
        )
    }

    /// Whether `coord` falls inside the box (corners inclusive).
    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.lat >= self.sw.lat
            && coord.lat <= self.ne.lat
            && coord.lng >= self.sw.lng
            && coord.lng <= self.ne.lng
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    /// Used to fit the view to a set of search-result markers.
    #[must_use]
    pub fn around(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let mut min_lat = first.lat;
        let mut max_lat = first.lat;
        let mut min_lng = first.lng;
        let mut max_lng = first.lng;
        for p in &points[1..] {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }
        Some(Self {
            sw: Coordinate::sanitized(min_lat, min_lng),
            ne: Coordinate::sanitized(max_lat, max_lng),
        })
    }
}

/// Great-circle distance between two coordinates in kilometers.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Effective seller-search radius for a viewport: half the SW↔NE diagonal.
///
/// Strictly monotonic under strict bounds containment — a box that strictly
/// contains another always yields a larger radius.
#[must_use]
pub fn search_radius_km(bounds: &Bounds) -> f64 {
    haversine_km(bounds.sw, bounds.ne) / 2.0
}
