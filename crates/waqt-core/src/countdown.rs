//! Countdown to the next prayer.
//!
//! One formatting policy: second granularity inside the final minute
//! (the UI ticks at 1 Hz there), minute granularity otherwise (one tick
//! per 60 s). [`refresh_interval`] returns the matching tick period so
//! the display never skips a boundary.

use chrono::{Duration, NaiveTime, Timelike};

use crate::schedule::{parse_clock, Prayer};

/// Time remaining until `prayer` today, clamped at zero.
///
/// The target is the prayer's hour/minute with seconds zeroed. Returns
/// `None` when the prayer's time string does not parse.
pub fn time_until(prayer: &Prayer, now: NaiveTime) -> Option<Duration> {
    let target = parse_clock(&prayer.time)?;
    let target_secs = i64::from(target.hour()) * 3600 + i64::from(target.minute()) * 60;
    let now_secs = i64::from(now.num_seconds_from_midnight());
    Some(Duration::seconds((target_secs - now_secs).max(0)))
}

/// Render a remaining duration.
///
/// Under a minute: `42s`. An hour or more: `2h 5m`. In between: `15m`.
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    let mins = secs / 60;
    if mins < 1 {
        format!("{secs}s")
    } else if mins >= 60 {
        format!("{}h {}m", mins / 60, mins % 60)
    } else {
        format!("{mins}m")
    }
}

/// Tick period matching the formatting granularity: 1 s inside the
/// final minute, 60 s otherwise.
pub fn refresh_interval(remaining: Duration) -> std::time::Duration {
    if remaining.num_seconds() < 60 {
        std::time::Duration::from_secs(1)
    } else {
        std::time::Duration::from_secs(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::PrayerName;
    use proptest::prelude::*;

    fn prayer(time: &str) -> Prayer {
        Prayer {
            name: PrayerName::Dhuhr,
            time: time.into(),
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn quarter_hour_formats_as_minutes() {
        let remaining = time_until(&prayer("12:15"), at(12, 0, 0)).unwrap();
        assert_eq!(remaining, Duration::minutes(15));
        assert_eq!(format_countdown(remaining), "15m");
    }

    #[test]
    fn over_an_hour_formats_as_hours_and_minutes() {
        let remaining = time_until(&prayer("15:40"), at(12, 0, 0)).unwrap();
        assert_eq!(format_countdown(remaining), "3h 40m");
    }

    #[test]
    fn final_minute_formats_as_seconds() {
        let remaining = time_until(&prayer("12:15"), at(12, 14, 18)).unwrap();
        assert_eq!(format_countdown(remaining), "42s");
    }

    #[test]
    fn past_target_clamps_to_zero() {
        let remaining = time_until(&prayer("12:15"), at(13, 0, 0)).unwrap();
        assert_eq!(remaining, Duration::zero());
        assert_eq!(format_countdown(remaining), "0s");
    }

    #[test]
    fn seconds_in_target_are_zeroed() {
        // 12:15:45 counts as 12:15:00.
        let remaining = time_until(&prayer("12:15:45"), at(12, 14, 0)).unwrap();
        assert_eq!(remaining, Duration::seconds(60));
    }

    #[test]
    fn unparseable_target_is_none() {
        assert!(time_until(&prayer(""), at(12, 0, 0)).is_none());
        assert!(time_until(&prayer("soon"), at(12, 0, 0)).is_none());
    }

    #[test]
    fn tick_rate_switches_inside_final_minute() {
        assert_eq!(
            refresh_interval(Duration::seconds(59)),
            std::time::Duration::from_secs(1)
        );
        assert_eq!(
            refresh_interval(Duration::seconds(60)),
            std::time::Duration::from_secs(60)
        );
        assert_eq!(
            refresh_interval(Duration::minutes(90)),
            std::time::Duration::from_secs(60)
        );
    }

    proptest! {
        /// Remaining time never increases as the clock advances, and
        /// never goes negative.
        #[test]
        fn countdown_is_monotone_and_clamped(
            target_min in 0u32..1440,
            a in 0u32..86_400,
            step in 0u32..3_600,
        ) {
            let b = (a + step).min(86_399);
            let p = prayer(&format!("{:02}:{:02}", target_min / 60, target_min % 60));
            let early = NaiveTime::from_num_seconds_from_midnight_opt(a, 0).unwrap();
            let late = NaiveTime::from_num_seconds_from_midnight_opt(b, 0).unwrap();

            let r_early = time_until(&p, early).unwrap();
            let r_late = time_until(&p, late).unwrap();
            prop_assert!(r_late <= r_early);
            prop_assert!(r_late >= Duration::zero());
        }
    }
}
