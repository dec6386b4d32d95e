//! Upcoming-prayer selection.
//!
//! Comparison is done on numeric minute-of-day, never on the raw time
//! strings. Prayers whose time does not parse (including the empty
//! string for unknown times) are filtered out up front, so they can
//! never be selected as upcoming.

use chrono::{NaiveTime, Timelike};

use super::{parse_clock, Prayer};

/// Minutes since midnight for a `HH:MM`/`HH:MM:SS` string, `None` when
/// the string does not parse.
pub fn minute_of_day(time: &str) -> Option<u32> {
    let t = parse_clock(time)?;
    Some(t.hour() * 60 + t.minute())
}

/// First prayer in canonical order whose time strictly exceeds `now`.
///
/// Returns `None` when every prayer of the day has passed; callers then
/// fall back to the following day's schedule.
pub fn upcoming_prayer<'a>(prayers: &'a [Prayer], now: NaiveTime) -> Option<&'a Prayer> {
    let now_min = now.hour() * 60 + now.minute();
    prayers
        .iter()
        .filter_map(|p| minute_of_day(&p.time).map(|m| (p, m)))
        .find(|&(_, m)| m > now_min)
        .map(|(p, _)| p)
}
