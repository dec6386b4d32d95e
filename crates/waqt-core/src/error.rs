//! Core error types for waqt-core.
//!
//! This module defines the error hierarchy using thiserror. Expected
//! absences (no row for a date, no upcoming prayer today) are modeled as
//! `Option` at the call sites, never as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for waqt-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cache slot errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Upstream fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Location resolution errors
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Cache slot errors. Absent or corrupt entries are a cache miss, not an
/// error; these cover the write path only.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem access failed
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized
    #[error("Cache serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Upstream fetch errors (recoverable; cached data is left intact).
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("API request failed with status {status}")]
    Status { status: u16 },

    /// Configured base URL does not parse
    #[error("Invalid base URL '{url}': {message}")]
    BadBaseUrl { url: String, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response format: {0}")]
    MalformedResponse(String),
}

/// Location resolution errors. Each variant maps to a distinct
/// user-facing message; `Denied` puts the application into its
/// "location disabled" mode rather than a data-error path.
#[derive(Error, Debug)]
pub enum LocationError {
    /// No coordinates granted/configured
    #[error("Location access denied: no coordinates configured")]
    Denied,

    /// Coordinates exist but are unusable
    #[error("Location information is unavailable: {0}")]
    Unavailable(String),

    /// Position fix did not arrive in time
    #[error("The request to get your location timed out")]
    Timeout,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
