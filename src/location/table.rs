//! The fixed location reference table.
//!
//! One immutable table backs both the timezone view and the coordinate view,
//! so a name present in one is always present in the other.

use super::types::{Coordinates, Location, LocationError};
use chrono_tz::Tz;
use std::collections::HashSet;

// ─── Dataset ─────────────────────────────────────────────────────

/// All selectable locations, in display order.
pub const LOCATIONS: &[Location] = &[
    Location {
        name: "Korea", tz: "Asia/Seoul",
        lat: 37.5665, lon: 126.9780,
        aliases: &["seoul", "south korea"],
    },
    Location {
        name: "Winnipeg", tz: "America/Winnipeg",
        lat: 49.8950, lon: -97.1384,
        aliases: &[],
    },
    Location {
        name: "Hong Kong", tz: "Asia/Hong_Kong",
        lat: 22.3193, lon: 114.1694,
        aliases: &["hongkong", "hk"],
    },
    Location {
        name: "Guanzhou", tz: "Asia/Shanghai",
        lat: 23.1291, lon: 113.2644,
        aliases: &["guangzhou", "canton"],
    },
    Location {
        name: "Shanghai", tz: "Asia/Shanghai",
        lat: 31.2304, lon: 121.4737,
        aliases: &[],
    },
    Location {
        name: "Singapore", tz: "Asia/Singapore",
        lat: 1.3521, lon: 103.8198,
        aliases: &[],
    },
    Location {
        name: "Australia", tz: "Australia/Sydney",
        lat: -33.8688, lon: 151.2093,
        aliases: &["sydney"],
    },
    Location {
        name: "New York", tz: "America/New_York",
        lat: 40.7128, lon: -74.0060,
        aliases: &["newyork", "nyc"],
    },
    Location {
        name: "Mexico", tz: "America/Mexico_City",
        lat: 19.4326, lon: -99.1332,
        aliases: &["mexico city", "cdmx"],
    },
    Location {
        name: "Germany", tz: "Europe/Berlin",
        lat: 51.1657, lon: 10.4515,
        aliases: &["berlin", "deutschland"],
    },
    Location {
        name: "England", tz: "Europe/London",
        lat: 51.5074, lon: -0.1278,
        aliases: &["london", "uk"],
    },
    Location {
        name: "UAE", tz: "Asia/Dubai",
        lat: 25.2048, lon: 55.2708,
        aliases: &["dubai", "united arab emirates"],
    },
    Location {
        name: "France", tz: "Europe/Paris",
        lat: 46.6031, lon: 1.8883,
        aliases: &["paris"],
    },
    Location {
        name: "Japan", tz: "Asia/Tokyo",
        lat: 35.6895, lon: 139.6917,
        aliases: &["tokyo"],
    },
    Location {
        name: "Denmark", tz: "Europe/Copenhagen",
        lat: 55.6761, lon: 12.5683,
        aliases: &["copenhagen", "danmark"],
    },
    Location {
        name: "New Zealand", tz: "Pacific/Auckland",
        lat: -40.9006, lon: 174.8860,
        aliases: &["auckland", "nz", "aotearoa"],
    },
    Location {
        name: "Netherlands", tz: "Europe/Amsterdam",
        lat: 52.3702, lon: 4.8952,
        aliases: &["amsterdam", "holland", "nederland"],
    },
    Location {
        name: "Toronto", tz: "America/Toronto",
        lat: 43.6510, lon: -79.3470,
        aliases: &[],
    },
    Location {
        name: "Vancouver", tz: "America/Vancouver",
        lat: 49.2827, lon: -123.1207,
        aliases: &[],
    },
    Location {
        name: "California", tz: "America/Los_Angeles",
        lat: 36.7783, lon: -119.4179,
        aliases: &["los angeles", "san francisco"],
    },
];

// ─── Lookups ─────────────────────────────────────────────────────

/// Exact, case-sensitive lookup by location name.
pub fn lookup(name: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|loc| loc.name == name)
}

/// The IANA timezone for a location name.
pub fn timezone_of(name: &str) -> Option<&'static str> {
    lookup(name).map(|loc| loc.tz)
}

/// The coordinate pair for a location name.
pub fn coordinates_of(name: &str) -> Option<Coordinates> {
    lookup(name).map(Location::coordinates)
}

/// Location names in display order.
pub fn names() -> impl Iterator<Item = &'static str> {
    LOCATIONS.iter().map(|loc| loc.name)
}

/// Check the dataset once at startup.
pub fn validate_table() -> Result<(), LocationError> {
    validate(LOCATIONS)
}

fn validate(locations: &[Location]) -> Result<(), LocationError> {
    let mut seen = HashSet::new();
    for loc in locations {
        if !seen.insert(loc.name) {
            return Err(LocationError::DuplicateName(loc.name.to_string()));
        }
        if !loc.lat.is_finite() || !loc.lon.is_finite() {
            return Err(LocationError::NonFiniteCoordinates(loc.name.to_string()));
        }
        if !(-90.0..=90.0).contains(&loc.lat) {
            return Err(LocationError::LatitudeOutOfRange {
                name: loc.name.to_string(),
                lat: loc.lat,
            });
        }
        if !(-180.0..=180.0).contains(&loc.lon) {
            return Err(LocationError::LongitudeOutOfRange {
                name: loc.name.to_string(),
                lon: loc.lon,
            });
        }
        if loc.tz.parse::<Tz>().is_err() {
            return Err(LocationError::InvalidTimezone {
                name: loc.name.to_string(),
                tz: loc.tz.to_string(),
            });
        }
    }
    Ok(())
}

// ─── Fuzzy resolution (CLI input) ────────────────────────────────

/// Compute edit distance between two strings (Levenshtein).
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

fn spellings(loc: &Location) -> impl Iterator<Item = String> + '_ {
    std::iter::once(loc.name.to_lowercase()).chain(loc.aliases.iter().map(|a| a.to_string()))
}

/// Resolve free-form user input to a table entry.
///
/// Tries an exact case-insensitive name match, then aliases, then a
/// substring match (queries of 3+ chars), then the closest spelling within
/// edit distance 2.
pub fn resolve(query: &str) -> Option<&'static Location> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    if let Some(loc) = LOCATIONS.iter().find(|loc| loc.name.to_lowercase() == q) {
        return Some(loc);
    }

    if let Some(loc) = LOCATIONS.iter().find(|loc| loc.aliases.contains(&q.as_str())) {
        return Some(loc);
    }

    if q.chars().count() >= 3 {
        for loc in LOCATIONS {
            if spellings(loc).any(|s| s.contains(&q)) {
                return Some(loc);
            }
        }
    }

    let mut best: Option<(&'static Location, usize)> = None;
    for loc in LOCATIONS {
        for s in spellings(loc) {
            let dist = edit_distance(&q, &s);
            if dist <= 2 && best.map_or(true, |(_, d)| dist < d) {
                best = Some((loc, dist));
            }
        }
    }
    best.map(|(loc, _)| loc)
}

/// Format a coordinate pair as `37.5665°N, 126.9780°E`.
pub fn format_coords(lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", lat.abs(), ns, lon.abs(), ew)
}
