//! Great-circle distance between table locations (haversine).
//!
//! Unknown names are not an error: the numeric form yields `None` and the
//! display form yields an empty string, so callers simply show nothing.

use crate::location::{self, Coordinates};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinate pairs, in kilometers.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance in kilometers between two named locations.
pub fn distance_km(first: &str, second: &str) -> Option<f64> {
    let a = location::coordinates_of(first)?;
    let b = location::coordinates_of(second)?;
    Some(haversine_km(a, b))
}

/// Display form, e.g. `"11052.58 km"`; empty when either name is unknown.
pub fn distance(first: &str, second: &str) -> String {
    distance_km(first, second)
        .map(format_km)
        .unwrap_or_default()
}

/// Format kilometers to two decimals with a unit suffix.
pub fn format_km(km: f64) -> String {
    format!("{:.2} km", km)
}
