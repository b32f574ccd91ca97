//! Web-Mercator projection between geographic and pixel space.
//!
//! Standard 256px-tile pyramid: world width at zoom `z` is `256 * 2^z`
//! pixels. Used by the viewport controller to pan a clicked marker to the
//! screen center while compensating for the marker's anchor offset.

use std::f64::consts::PI;

use crate::coord::Coordinate;

const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web-Mercator projection, `atan(sinh(π))` rounded
/// toward the equator so clamped poles project inside `[0, world_size]`.
const MAX_MERCATOR_LAT: f64 = 85.051_128_77;

/// A point in projected pixel space at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << u32::from(zoom.min(31)))
}

/// Project a coordinate to pixel space at the given zoom.
#[must_use]
pub fn project(coord: Coordinate, zoom: u8) -> PixelPoint {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let sin = lat.to_radians().sin();

    PixelPoint {
        x: (coord.lng + 180.0) / 360.0 * size,
        y: (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size,
    }
}

/// Inverse of [`project`]: pixel space back to a sanitized coordinate.
#[must_use]
pub fn unproject(point: PixelPoint, zoom: u8) -> Coordinate {
    let size = world_size(zoom);
    let lng = point.x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * point.y / size);
    let lat = n.sinh().atan().to_degrees();
    Coordinate::sanitized(lat, lng)
}
