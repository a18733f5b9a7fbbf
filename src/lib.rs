//! Dual Chronos: two-location world clock with great-circle distance.
//!
//! The reference table lives in [`location`], the haversine calculation in
//! [`distance`], time formatting and snapshots in [`clock`], the cancellable
//! once-per-second refresh in [`ticker`], and the HTTP widget in [`server`].

pub mod clock;
pub mod distance;
pub mod location;
pub mod server;
pub mod ticker;
