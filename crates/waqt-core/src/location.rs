//! Location snapshots and the cache refresh gate.
//!
//! The gate is a pure decision function: it never performs I/O and
//! never mutates the cache. Replacing the slot after a successful fetch
//! is the fetch adapter path's responsibility.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::LocationError;
use crate::storage::cache::CachedSchedule;
use crate::storage::config::Config;

/// A resolved position with its capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    /// Epoch milliseconds when the position was captured.
    pub captured_at_ms: i64,
}

impl LocationSnapshot {
    pub fn now(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            captured_at_ms: Utc::now().timestamp_millis(),
        }
    }
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle (haversine) distance between two snapshots, in meters.
pub fn distance_meters(a: &LocationSnapshot, b: &LocationSnapshot) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Decide whether a cached schedule must be refetched for `current`.
///
/// True when no cache exists, or when the cached location lies strictly
/// more than `threshold_meters` away. A cache at exactly the threshold
/// is kept.
pub fn should_refresh(
    cached: Option<&CachedSchedule>,
    current: &LocationSnapshot,
    threshold_meters: f64,
) -> bool {
    match cached {
        None => true,
        Some(c) => distance_meters(&c.location, current) > threshold_meters,
    }
}

/// Resolve the current location from the environment or configuration.
///
/// `WAQT_LOCATION="lat,lon"` overrides the configured coordinates.
/// Missing coordinates are a `Denied` (location disabled) condition,
/// distinct from malformed or out-of-range values.
pub fn resolve_location(config: &Config) -> Result<LocationSnapshot, LocationError> {
    if let Ok(raw) = std::env::var("WAQT_LOCATION") {
        return parse_override(&raw);
    }
    match (config.location.latitude, config.location.longitude) {
        (Some(lat), Some(lon)) => checked_snapshot(lat, lon),
        _ => Err(LocationError::Denied),
    }
}

fn parse_override(raw: &str) -> Result<LocationSnapshot, LocationError> {
    let mut parts = raw.splitn(2, ',');
    let lat = parts
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| LocationError::Unavailable(format!("cannot parse WAQT_LOCATION '{raw}'")))?;
    let lon = parts
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| LocationError::Unavailable(format!("cannot parse WAQT_LOCATION '{raw}'")))?;
    checked_snapshot(lat, lon)
}

fn checked_snapshot(lat: f64, lon: f64) -> Result<LocationSnapshot, LocationError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(LocationError::Unavailable(format!(
            "coordinates ({lat}, {lon}) out of range"
        )));
    }
    Ok(LocationSnapshot::now(lat, lon))
}
