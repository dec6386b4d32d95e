//! Single-slot schedule cache.
//!
//! Holds the most recent fetched window as one JSON file under the data
//! directory. There is no history and no partial merge: an accepted
//! refresh replaces the slot wholesale. Absent or corrupt files are a
//! cache miss, never an error.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::CacheError;
use crate::location::LocationSnapshot;
use crate::schedule::DailyTimes;

const CACHE_FILE: &str = "cache.json";

/// The most recent fetched schedule window with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSchedule {
    pub schedule: Vec<DailyTimes>,
    /// Where the window was fetched for; gates later refreshes.
    pub location: LocationSnapshot,
    /// Epoch milliseconds when the fetch completed. Also orders
    /// competing refreshes: an older snapshot never replaces a newer one.
    pub fetched_at_ms: i64,
    /// IANA zone the upstream resolved the times in.
    pub timezone: String,
    /// Reverse-geocoded display name, when the lookup succeeded.
    #[serde(default)]
    pub place: Option<String>,
}

/// File-backed single-slot store for [`CachedSchedule`].
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Open the store at the default data directory.
    pub fn open() -> Result<Self, CacheError> {
        Ok(Self {
            path: data_dir()?.join(CACHE_FILE),
        })
    }

    /// Open the store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the slot. Absent or corrupt entries are a miss.
    pub fn load(&self) -> Option<CachedSchedule> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Replace the slot wholesale with `snapshot`.
    ///
    /// Returns `false` without writing when the slot already holds a
    /// newer snapshot -- a response from a superseded fetch arriving
    /// late must not clobber the one that completed after it.
    pub fn replace(&self, snapshot: &CachedSchedule) -> Result<bool, CacheError> {
        if let Some(existing) = self.load() {
            if existing.fetched_at_ms > snapshot.fetched_at_ms {
                return Ok(false);
            }
        }
        let content = serde_json::to_string(snapshot)?;
        std::fs::write(&self.path, content)?;
        Ok(true)
    }

    /// Remove the slot. Removing an absent slot is fine.
    pub fn clear(&self) -> Result<(), CacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
