//! Geographic primitives shared by the directory, mission, and corridor layers.
//!
//! All functions here are pure: distance and proximity are computed from the
//! arguments alone, so arrival detection can be driven deterministically by
//! each incoming location event.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate in decimal degrees.
///
/// Field names match the wire format used by vehicle location pings
/// (`lat`/`lng`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Great-circle distance between two points in kilometers (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lng - a.lng).to_radians();

    let x = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * x.sqrt().atan2((1.0 - x).sqrt())
}

/// Check whether two points are within `meters` of each other.
pub fn within_threshold(a: GeoPoint, b: GeoPoint, meters: f64) -> bool {
    haversine_km(a, b) * 1000.0 <= meters
}

/// Distance in kilometers from point `p` to the segment `a`→`b`.
///
/// Uses a local equirectangular projection around the segment, which is
/// accurate at corridor scale (a few kilometers). Degenerate segments fall
/// back to point distance.
pub fn point_segment_distance_km(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let ref_lat = ((a.lat + b.lat) / 2.0).to_radians();
    let scale = ref_lat.cos();

    // Project to a flat plane in kilometer units.
    let to_xy = |g: GeoPoint| -> (f64, f64) {
        let x = g.lng.to_radians() * scale * EARTH_RADIUS_KM;
        let y = g.lat.to_radians() * EARTH_RADIUS_KM;
        (x, y)
    };

    let (px, py) = to_xy(p);
    let (ax, ay) = to_xy(a);
    let (bx, by) = to_xy(b);

    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return haversine_km(p, a);
    }

    let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
