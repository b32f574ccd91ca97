//! Coordinate sanitization, viewport bounds math, and map projection helpers.
//!
//! Everything here is pure: no I/O, no failure modes. Malformed input is a
//! caller bug, not a runtime error — conversions always yield a sanitized
//! [`Coordinate`].

mod bounds;
mod coord;
mod project;

pub use bounds::{haversine_km, search_radius_km, Bounds};
pub use coord::{Coordinate, LngLat};
pub use project::{project, unproject, PixelPoint};

/// Default search radius for the initial seller fetch, in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Zoom applied when an origin was resolved to a real location.
pub const CITY_ZOOM: u8 = 13;

/// Zoom applied when every location tier failed and the map falls back
/// to a whole-world view.
pub const WORLD_ZOOM: u8 = 2;

/// Center of the whole-world fallback view.
pub const WORLD_CENTER: Coordinate = Coordinate { lat: 0.0, lng: 0.0 };
