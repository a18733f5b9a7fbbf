//! Local wall-clock formatting and the two-location snapshot.
//!
//! A snapshot exists only when both selected names resolve; otherwise the
//! caller keeps whatever it last displayed.

use crate::distance;
use crate::location;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Format an instant as en-US `h:mm:ss AM/PM` in the given timezone.
pub fn local_time(tz: Tz, instant: DateTime<Utc>) -> String {
    instant.with_timezone(&tz).format("%-I:%M:%S %p").to_string()
}

/// Local time at a named location, or `None` if the name is unknown.
pub fn local_time_of(name: &str, instant: DateTime<Utc>) -> Option<String> {
    let tz: Tz = location::timezone_of(name)?.parse().ok()?;
    Some(local_time(tz, instant))
}

/// The two selected location names. Either slot may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub first: Option<String>,
    pub second: Option<String>,
}

impl Selection {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: Some(first.into()),
            second: Some(second.into()),
        }
    }

    /// True when both slots hold a non-empty name.
    pub fn is_complete(&self) -> bool {
        matches!((&self.first, &self.second), (Some(a), Some(b)) if !a.is_empty() && !b.is_empty())
    }
}

/// One location's local time at the captured instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationTime {
    pub name: String,
    pub tz: String,
    pub time: String,
}

impl LocationTime {
    fn capture(name: &str, instant: DateTime<Utc>) -> Option<Self> {
        let loc = location::lookup(name)?;
        Some(Self {
            name: loc.name.to_string(),
            tz: loc.tz.to_string(),
            time: local_time_of(loc.name, instant)?,
        })
    }
}

/// Everything the display shows for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub at: DateTime<Utc>,
    pub first: LocationTime,
    pub second: LocationTime,
    pub distance: String,
}

impl Snapshot {
    /// Capture both local times and the distance at `instant`.
    pub fn capture(selection: &Selection, instant: DateTime<Utc>) -> Option<Self> {
        let first = LocationTime::capture(selection.first.as_deref()?, instant)?;
        let second = LocationTime::capture(selection.second.as_deref()?, instant)?;
        let distance = distance::distance(&first.name, &second.name);
        Some(Self { at: instant, first, second, distance })
    }

    /// Human-readable block for the terminal.
    pub fn render(&self) -> String {
        let width = self.first.name.len().max(self.second.name.len());
        let mut out = String::new();
        for lt in [&self.first, &self.second] {
            out.push_str(&format!(
                "  \u{1F552} {:<width$}  {:>11}  ({})\n",
                lt.name,
                lt.time,
                lt.tz,
                width = width
            ));
        }
        out.push_str(&format!("  \u{1F4CF} Distance: {}\n", self.distance));
        out
    }
}
