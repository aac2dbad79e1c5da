//! Application settings persistence for M-Hike.
//!
//! Stores where the hike database lives and how verbose logging is, in a
//! JSON file at an OS-appropriate location.

use crate::Result;
use mhike_core::StorageTarget;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Path of the SQLite database file.
    pub database_path: String,
    /// `log` level filter name: `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path().to_string_lossy().to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppSettings {
    /// Where the database should be opened on this platform.
    pub fn storage_target(&self) -> StorageTarget {
        StorageTarget::platform_default(&self.database_path)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/mhike/settings.json`
/// - Windows: `%APPDATA%/MHike/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("MHike").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("mhike").join("settings.json")
    }
}

/// Returns the default database location: `<data dir>/mhike/mhike.db`.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("mhike")
        .join("mhike.db")
}

/// Loads settings from the default location.
pub fn load_settings() -> AppSettings {
    load_settings_from(settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from<P: AsRef<Path>>(path: P) -> AppSettings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to the default location.
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    save_settings_to(settings_file_path(), settings)
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings_to<P: AsRef<Path>>(path: P, settings: &AppSettings) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
