//! Location reference data for Dual Chronos.
//!
//! A fixed table of twenty named locations, each with an IANA timezone and
//! a coordinate pair, plus fuzzy resolution for typed input.

pub mod table;
pub mod types;

pub use table::{
    coordinates_of, format_coords, lookup, names, resolve, timezone_of, validate_table, LOCATIONS,
};
pub use types::{Coordinates, Location, LocationError, LocationInfo};

/// Return the full location list (for selectors / API).
pub fn location_list() -> Vec<LocationInfo> {
    LOCATIONS.iter().map(LocationInfo::from).collect()
}
