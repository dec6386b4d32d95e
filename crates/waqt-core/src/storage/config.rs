//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Upstream API endpoints and the User-Agent sent to them
//! - The cache refresh distance threshold
//! - Fixed coordinates and an optional timezone override
//!
//! Configuration is stored at `~/.config/waqt/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Time-table API, queried by `{lt, ln, d, tz}`.
    #[serde(default = "default_timetable_url")]
    pub timetable_url: String,
    /// Reverse-geocoding endpoint, queried by `{lat, lon}`.
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Cache gating configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Moving further than this from the cached fetch location forces a
    /// refetch. Domain default is 25 km.
    #[serde(default = "default_refresh_threshold")]
    pub refresh_threshold_meters: f64,
}

/// Where the user is, when no runtime override is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// IANA zone name sent to the time-table API. Defaults to the
    /// system zone when unset.
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/waqt/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

// Default functions
fn default_timetable_url() -> String {
    "https://www.muwaqqit.com/api.json".into()
}
fn default_geocode_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".into()
}
fn default_user_agent() -> String {
    "Waqt Prayer Times".into()
}
fn default_refresh_threshold() -> f64 {
    25_000.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timetable_url: default_timetable_url(),
            geocode_url: default_geocode_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_threshold_meters: default_refresh_threshold(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => parse_number(value)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    // Optional fields deserialize to null; infer the type
                    // from the literal.
                    serde_json::Value::Null => coerce_literal(value),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/waqt"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns error if the key
    /// is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    /// Timezone sent to the time-table API: the configured override, or
    /// the system IANA zone, or UTC as the last resort.
    pub fn timezone(&self) -> String {
        if let Some(ref tz) = self.location.timezone {
            return tz.clone();
        }
        iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

fn parse_number(value: &str) -> Option<serde_json::Value> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(serde_json::Value::Number(n.into()));
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(serde_json::Value::Number)
}

fn coerce_literal(value: &str) -> serde_json::Value {
    if let Ok(b) = value.parse::<bool>() {
        return serde_json::Value::Bool(b);
    }
    if let Some(n) = parse_number(value) {
        return n;
    }
    serde_json::Value::String(value.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.cache.refresh_threshold_meters, 25_000.0);
        assert_eq!(parsed.api.timetable_url, cfg.api.timetable_url);
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.cache.refresh_threshold_meters, 25_000.0);
        assert!(parsed.location.latitude.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get("cache.refresh_threshold_meters").as_deref(),
            Some("25000.0")
        );
        assert_eq!(
            cfg.get("api.geocode_url").as_deref(),
            Some("https://nominatim.openstreetmap.org/reverse")
        );
        assert!(cfg.get("api.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "cache.refresh_threshold_meters", "10000")
            .unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "cache.refresh_threshold_meters").unwrap(),
            &serde_json::Value::Number(10_000.into())
        );
    }

    #[test]
    fn set_json_value_by_path_fills_optional_coordinates() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "location.latitude", "51.5").unwrap();
        let parsed: Config = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.location.latitude, Some(51.5));
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "cache.nonexistent_key", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result =
            Config::set_json_value_by_path(&mut json, "cache.refresh_threshold_meters", "far");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn timezone_prefers_configured_override() {
        let mut cfg = Config::default();
        cfg.location.timezone = Some("Europe/London".into());
        assert_eq!(cfg.timezone(), "Europe/London");
    }

    #[test]
    fn timezone_without_override_is_nonempty() {
        let cfg = Config::default();
        assert!(!cfg.timezone().is_empty());
    }
}
