//! Core types for the location reference table.

use serde::Serialize;
use std::fmt;

/// A latitude/longitude pair in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A named location with its IANA timezone and coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub tz: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// Lowercase alternative spellings accepted by the fuzzy resolver.
    pub aliases: &'static [&'static str],
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// A location entry for the public location list.
#[derive(Debug, Clone, Serialize)]
pub struct LocationInfo {
    pub name: String,
    pub tz: String,
    pub lat: f64,
    pub lon: f64,
    pub formatted_coords: String,
}

impl From<&Location> for LocationInfo {
    fn from(loc: &Location) -> Self {
        Self {
            name: loc.name.to_string(),
            tz: loc.tz.to_string(),
            lat: loc.lat,
            lon: loc.lon,
            formatted_coords: super::table::format_coords(loc.lat, loc.lon),
        }
    }
}

/// Reference table errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    InvalidTimezone { name: String, tz: String },
    LatitudeOutOfRange { name: String, lat: f64 },
    LongitudeOutOfRange { name: String, lon: f64 },
    DuplicateName(String),
    /// NaN or infinite coordinates, which no distance can be computed from.
    NonFiniteCoordinates(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimezone { name, tz } => {
                write!(f, "Location '{}' has an unknown timezone '{}'", name, tz)
            }
            Self::LatitudeOutOfRange { name, lat } => {
                write!(f, "Location '{}' latitude {} is outside -90..90", name, lat)
            }
            Self::LongitudeOutOfRange { name, lon } => {
                write!(f, "Location '{}' longitude {} is outside -180..180", name, lon)
            }
            Self::DuplicateName(name) => write!(f, "Location '{}' appears more than once", name),
            Self::NonFiniteCoordinates(name) => {
                write!(f, "Location '{}' has non-finite coordinates", name)
            }
        }
    }
}

impl std::error::Error for LocationError {}
