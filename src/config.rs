//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::model::viewport::DEFAULT_DAY_WIDTH;

const APP_NAME: &str = "FiberTimeline";
const SETTINGS_FILE: &str = "settings.json";

const MIN_DAY_WIDTH: f32 = 8.0;
const MAX_DAY_WIDTH: f32 = 200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Log filter, e.g. "info" or "fiber_timeline=debug".
    pub log_level: String,
    /// Dataset opened last; reopened on start when it still exists.
    pub last_dataset: Option<PathBuf>,
    /// Project tab selected last.
    pub last_project: Option<String>,
    /// Pixels per day at zoom 1.0.
    pub day_width: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            last_dataset: None,
            last_project: None,
            day_width: DEFAULT_DAY_WIDTH,
        }
    }
}

impl AppSettings {
    /// Day width clamped to a usable range.
    pub fn day_width(&self) -> f32 {
        if self.day_width.is_finite() {
            self.day_width.clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH)
        } else {
            DEFAULT_DAY_WIDTH
        }
    }
}

/// Platform directories used by the app.
#[derive(Debug, Clone)]
pub struct AppDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppDirs {
    pub fn discover() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", APP_NAME) {
            Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
                log_dir: proj_dirs.data_local_dir().join("logs"),
            }
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            Self {
                config_dir: dir.clone(),
                log_dir: dir.join("logs"),
            }
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }
}

/// Reads and writes [`AppSettings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppSettings, SettingsError> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load, falling back to defaults when the file is missing or broken.
    pub fn load_or_default(&self) -> AppSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(SettingsError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                AppSettings::default()
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                AppSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join(SETTINGS_FILE));
        let settings = AppSettings {
            last_project: Some("Ring A".into()),
            day_width: 48.0,
            ..Default::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join(SETTINGS_FILE));
        assert_eq!(store.load_or_default(), AppSettings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ nope").unwrap();
        let store = SettingsStore::new(&path);
        assert!(matches!(store.load(), Err(SettingsError::Json(_))));
        assert_eq!(store.load_or_default(), AppSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "log_level": "debug" }"#).unwrap();
        let settings = SettingsStore::new(&path).load().unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.day_width, DEFAULT_DAY_WIDTH);
    }

    #[test]
    fn test_day_width_is_clamped() {
        let mut settings = AppSettings::default();
        settings.day_width = 1.0;
        assert_eq!(settings.day_width(), MIN_DAY_WIDTH);
        settings.day_width = f32::NAN;
        assert_eq!(settings.day_width(), DEFAULT_DAY_WIDTH);
    }
}
