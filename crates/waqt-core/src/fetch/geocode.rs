//! Reverse geocoding -- coordinates to a display name.
//!
//! Any failure (transport, status, parse) yields a fixed placeholder
//! rather than an error; the place name is cosmetic and must never
//! block the schedule path.

use reqwest::header::USER_AGENT;
use serde::Deserialize;
use url::Url;

use crate::error::FetchError;
use crate::storage::config::Config;

/// Shown when no display name can be resolved.
pub const PLACE_FALLBACK: &str = "Location not found";

/// Nominatim-style reverse-geocoding client.
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: Url,
    user_agent: String,
}

impl GeocodeClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_base_url(&config.api.geocode_url, &config.api.user_agent)
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

    /// Display name for the coordinates, or [`PLACE_FALLBACK`].
    pub async fn display_name(&self, latitude: f64, longitude: f64) -> String {
        self.lookup(latitude, longitude)
            .await
            .unwrap_or_else(|_| PLACE_FALLBACK.to_string())
    }

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<String, FetchError> {
        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "14".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .header("Accept-Language", "en")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let place: RawPlace = response.json().await?;
        Ok(compose_place(&place))
    }
}

#[derive(Deserialize, Default)]
struct RawPlace {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: RawAddress,
}

#[derive(Deserialize, Default)]
struct RawAddress {
    #[serde(default)]
    suburb: Option<String>,
    #[serde(default)]
    county: Option<String>,
    #[serde(default)]
    state_district: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Prefer the canonical display name; otherwise compose one from the
/// address sub-fields, coarse to fine order preserved.
fn compose_place(place: &RawPlace) -> String {
    if let Some(name) = place.display_name.as_deref() {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    let components: Vec<&str> = [
        place.address.suburb.as_deref(),
        place.address.county.as_deref(),
        place.address.state_district.as_deref(),
        place.address.state.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    if components.is_empty() {
        PLACE_FALLBACK.to_string()
    } else {
        components.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_wins() {
        let place = RawPlace {
            display_name: Some("Whitechapel, London, England, United Kingdom".into()),
            address: RawAddress {
                suburb: Some("Whitechapel".into()),
                ..Default::default()
            },
        };
        assert_eq!(
            compose_place(&place),
            "Whitechapel, London, England, United Kingdom"
        );
    }

    #[test]
    fn address_fields_compose_when_display_name_absent() {
        let place = RawPlace {
            display_name: None,
            address: RawAddress {
                suburb: Some("Whitechapel".into()),
                county: None,
                state_district: Some("Greater London".into()),
                state: Some("England".into()),
            },
        };
        assert_eq!(compose_place(&place), "Whitechapel, Greater London, England");
    }

    #[test]
    fn empty_response_falls_back_to_placeholder() {
        assert_eq!(compose_place(&RawPlace::default()), PLACE_FALLBACK);
    }
}
