//! # Waqt Core Library
//!
//! This library provides the core business logic for the Waqt prayer-times
//! application. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary built on top of this crate.
//!
//! ## Architecture
//!
//! - **Schedule Engine**: Pure functions over a fetched window of daily
//!   prayer rows -- day resolution, canonical expansion, upcoming selection
//! - **Countdown**: Wall-clock distance to the next prayer with a coarse /
//!   fine formatting switch and a matching tick interval
//! - **Location Gate**: Great-circle distance check deciding when a cached
//!   schedule must be refetched for the current coordinates
//! - **Storage**: TOML-based configuration and a single-slot JSON cache
//! - **Fetch Adapters**: Upstream timetable and reverse-geocoding clients
//!
//! ## Key Components
//!
//! - [`DailyTimes`]: One calendar date with its six canonical prayer times
//! - [`upcoming_prayer`]: First prayer of the day still ahead of the clock
//! - [`CacheStore`]: Most-recent-snapshot cache with a stale-fetch guard
//! - [`TimetableClient`]: Upstream time-table API adapter

pub mod countdown;
pub mod error;
pub mod fetch;
pub mod location;
pub mod schedule;
pub mod storage;

pub use countdown::{format_countdown, refresh_interval, time_until};
pub use error::{CacheError, ConfigError, CoreError, FetchError, LocationError};
pub use fetch::{FetchedSchedule, GeocodeClient, TimetableClient};
pub use location::{distance_meters, resolve_location, should_refresh, LocationSnapshot};
pub use schedule::{
    date_range, find_for_date, normalize_time, upcoming_prayer, DailyTimes, Prayer, PrayerName,
};
pub use storage::{CacheStore, CachedSchedule, Config};
