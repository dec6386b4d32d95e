pub mod cache;
pub mod config;

pub use cache::{CacheStore, CachedSchedule};
pub use config::Config;

use std::path::PathBuf;

/// Returns `~/.config/waqt[-dev]/` based on WAQT_ENV.
///
/// Set WAQT_ENV=dev to use the development data directory, or
/// WAQT_DATA_DIR to point somewhere else entirely (tests use this).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(dir) = std::env::var("WAQT_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WAQT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("waqt-dev")
    } else {
        base_dir.join("waqt")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
