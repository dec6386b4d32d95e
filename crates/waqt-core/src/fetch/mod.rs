//! Upstream time-table adapter.
//!
//! Queries the time-table API by `{lt, ln, d, tz}` and reshapes its
//! response into the internal schedule model. The raw rows carry
//! per-prayer fields with alternate fallbacks (`fajr_time` falling back
//! to `fajr_time_min`, `esha_time` to `esha_time_min`); missing values
//! become empty strings, which downstream treats as unknown times.

mod geocode;

pub use geocode::{GeocodeClient, PLACE_FALLBACK};

use chrono::NaiveDate;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::error::FetchError;
use crate::schedule::DailyTimes;
use crate::storage::config::Config;

/// A transformed upstream response: the fetched window plus the
/// coordinates and timezone the upstream resolved for it.
#[derive(Debug, Clone)]
pub struct FetchedSchedule {
    pub days: Vec<DailyTimes>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// Time-table API client.
pub struct TimetableClient {
    http: reqwest::Client,
    base_url: Url,
    user_agent: String,
}

impl TimetableClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_base_url(&config.api.timetable_url, &config.api.user_agent)
    }

    pub fn with_base_url(base_url: &str, user_agent: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::BadBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            user_agent: user_agent.to_string(),
        })
    }

    /// Fetch the window covering `date` for the given coordinates.
    ///
    /// The upstream decides the window size; the response carries one
    /// row per date. A missing or empty `list` is a fetch failure, not
    /// an empty schedule.
    pub async fn fetch_window(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<FetchedSchedule, FetchError> {
        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("lt", latitude.to_string()),
                ("ln", longitude.to_string()),
                ("d", date.format("%Y-%m-%d").to_string()),
                ("tz", timezone.to_string()),
            ])
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let raw: RawResponse = response.json().await?;
        let list = raw
            .list
            .ok_or_else(|| FetchError::MalformedResponse("missing list property".into()))?;
        if list.is_empty() {
            return Err(FetchError::MalformedResponse("empty time-table window".into()));
        }

        let first = &list[0];
        let resolved_lat = value_as_f64(&first.lt).unwrap_or(latitude);
        let resolved_lon = value_as_f64(&first.ln).unwrap_or(longitude);
        let resolved_tz = first
            .tz
            .clone()
            .unwrap_or_else(|| timezone.to_string());

        Ok(FetchedSchedule {
            days: list.iter().map(to_daily).collect(),
            latitude: resolved_lat,
            longitude: resolved_lon,
            timezone: resolved_tz,
        })
    }
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    list: Option<Vec<RawDay>>,
}

#[derive(Deserialize, Default)]
struct RawDay {
    #[serde(default)]
    d: Option<String>,
    #[serde(default)]
    fajr_time: Option<String>,
    #[serde(default)]
    fajr_time_min: Option<String>,
    #[serde(default)]
    sunrise_time: Option<String>,
    #[serde(default)]
    zohr_time: Option<String>,
    #[serde(default)]
    mithl_time: Option<String>,
    #[serde(default)]
    sunset_time: Option<String>,
    #[serde(default)]
    esha_time: Option<String>,
    #[serde(default)]
    esha_time_min: Option<String>,
    // The upstream is loose about numeric types here.
    #[serde(default)]
    lt: Option<serde_json::Value>,
    #[serde(default)]
    ln: Option<serde_json::Value>,
    #[serde(default)]
    tz: Option<String>,
}

fn to_daily(raw: &RawDay) -> DailyTimes {
    DailyTimes {
        date: raw.d.clone().unwrap_or_default(),
        fajr: pick(&[&raw.fajr_time, &raw.fajr_time_min]),
        sunrise: pick(&[&raw.sunrise_time]),
        dhuhr: pick(&[&raw.zohr_time]),
        asr: pick(&[&raw.mithl_time]),
        maghrib: pick(&[&raw.sunset_time]),
        isha: pick(&[&raw.esha_time, &raw.esha_time_min]),
    }
}

/// First non-empty candidate, else empty string.
fn pick(candidates: &[&Option<String>]) -> String {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_string()
}

fn value_as_f64(value: &Option<serde_json::Value>) -> Option<f64> {
    match value.as_ref()? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_prefers_primary_fields() {
        let raw = RawDay {
            d: Some("2025-03-01".into()),
            fajr_time: Some("05:10".into()),
            fajr_time_min: Some("04:55".into()),
            sunrise_time: Some("06:20".into()),
            zohr_time: Some("12:15".into()),
            mithl_time: Some("15:40".into()),
            sunset_time: Some("18:05".into()),
            esha_time: Some("19:30".into()),
            ..Default::default()
        };
        let day = to_daily(&raw);
        assert_eq!(day.date, "2025-03-01");
        assert_eq!(day.fajr, "05:10");
        assert_eq!(day.dhuhr, "12:15");
        assert_eq!(day.asr, "15:40");
        assert_eq!(day.maghrib, "18:05");
        assert_eq!(day.isha, "19:30");
    }

    #[test]
    fn transform_falls_back_to_min_variants() {
        let raw = RawDay {
            d: Some("2025-03-01".into()),
            fajr_time_min: Some("04:55".into()),
            esha_time: Some("".into()),
            esha_time_min: Some("20:45".into()),
            ..Default::default()
        };
        let day = to_daily(&raw);
        assert_eq!(day.fajr, "04:55");
        assert_eq!(day.isha, "20:45");
    }

    #[test]
    fn transform_defaults_missing_fields_to_empty() {
        let day = to_daily(&RawDay::default());
        assert_eq!(day.date, "");
        assert_eq!(day.sunrise, "");
        assert_eq!(day.isha, "");
    }

    #[test]
    fn coordinates_coerce_from_number_or_string() {
        assert_eq!(value_as_f64(&Some(serde_json::json!(51.5))), Some(51.5));
        assert_eq!(value_as_f64(&Some(serde_json::json!("51.5"))), Some(51.5));
        assert_eq!(value_as_f64(&Some(serde_json::json!(null))), None);
        assert_eq!(value_as_f64(&None), None);
    }
}
