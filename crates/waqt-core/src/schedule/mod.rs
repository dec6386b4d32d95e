//! Prayer schedule model and day-level operations.
//!
//! A fetched window is a list of [`DailyTimes`] rows, one per calendar
//! date, keyed by `yyyy-MM-dd` string. Each row expands into six named
//! prayers in canonical order; that order is significant -- it drives
//! both display and upcoming-prayer selection.

mod upcoming;

pub use upcoming::{minute_of_day, upcoming_prayer};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of canonical daily prayers, in daily sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerName {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    /// All prayers in canonical daily order.
    pub const ALL: [PrayerName; 6] = [
        PrayerName::Fajr,
        PrayerName::Sunrise,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named prayer with its same-day wall-clock time.
///
/// The time string carries no date or timezone of its own; it inherits
/// the timezone the upstream source resolved for the request's
/// coordinates. An empty string means the time is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prayer {
    pub name: PrayerName,
    pub time: String,
}

/// One calendar date with its six prayer times.
///
/// Immutable once received. Times are `HH:MM` or `HH:MM:SS` strings,
/// empty when the upstream omitted the value. Under normal solar
/// geometry the non-empty times are non-decreasing in canonical order;
/// this is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTimes {
    /// ISO date string, `yyyy-MM-dd`.
    pub date: String,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl DailyTimes {
    /// Expand the row into the six canonical prayers, in order.
    ///
    /// Pure field projection; times are not validated here. Empty times
    /// pass through and are skipped downstream by the upcoming scan.
    pub fn prayers(&self) -> [Prayer; 6] {
        [
            Prayer {
                name: PrayerName::Fajr,
                time: self.fajr.clone(),
            },
            Prayer {
                name: PrayerName::Sunrise,
                time: self.sunrise.clone(),
            },
            Prayer {
                name: PrayerName::Dhuhr,
                time: self.dhuhr.clone(),
            },
            Prayer {
                name: PrayerName::Asr,
                time: self.asr.clone(),
            },
            Prayer {
                name: PrayerName::Maghrib,
                time: self.maghrib.clone(),
            },
            Prayer {
                name: PrayerName::Isha,
                time: self.isha.clone(),
            },
        ]
    }
}

/// Find the row matching `date` in a fetched window.
///
/// Returns `None` when no row matches -- a normal outcome for a date
/// outside the fetched window, not a failure. O(n) scan; n is a few
/// dozen days at most.
pub fn find_for_date(schedule: &[DailyTimes], date: NaiveDate) -> Option<&DailyTimes> {
    let key = date.format("%Y-%m-%d").to_string();
    schedule.iter().find(|row| row.date == key)
}

/// First and last date covered by a fetched window.
///
/// Rows arrive date-ordered from the upstream; the bounds are used for
/// date navigation limits.
pub fn date_range(schedule: &[DailyTimes]) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(&schedule.first()?.date, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(&schedule.last()?.date, "%Y-%m-%d").ok()?;
    Some((start, end))
}

/// Normalize a raw time string to `HH:MM` for display.
///
/// Accepts `HH:MM` or `HH:MM:SS` (seconds are dropped); anything else,
/// including the empty string, yields `None`.
pub fn normalize_time(raw: &str) -> Option<String> {
    parse_clock(raw).map(|t| t.format("%H:%M").to_string())
}

/// Parse `HH:MM` or `HH:MM:SS` into a clock time.
pub(crate) fn parse_clock(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}
