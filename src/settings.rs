//! Game settings and preferences
//!
//! Persisted as JSON next to the score board. Every field has a default, so a
//! partial or older file still loads.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SESSION_MS;
use crate::sim::Difficulty;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "BALLOON_POP_CONFIG";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preselected on the menu
    pub difficulty: Difficulty,
    /// Session length in seconds
    pub session_secs: u64,
    /// Fixed RNG seed (random per launch when unset)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Files ===
    /// Directory holding background art and sounds
    pub asset_dir: PathBuf,
    /// Score board file
    pub scores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = data_dir();
        Self {
            difficulty: Difficulty::Medium,
            session_secs: SESSION_MS / 1000,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            asset_dir: data_dir.join("assets"),
            scores_path: data_dir.join("scores.json"),
        }
    }
}

/// Per-user data directory, falling back to the working directory
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("balloon-pop")
}

impl Settings {
    /// Settings file location: `$BALLOON_POP_CONFIG`, else the data directory
    pub fn default_path() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir().join("settings.json"))
    }

    /// Session length in milliseconds (at least one second)
    pub fn session_ms(&self) -> u64 {
        self.session_secs.max(1).saturating_mul(1000)
    }

    /// Seed for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Load settings, falling back to defaults when the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source: io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.session_ms(), 30_000);
        assert!(settings.scores_path.ends_with("scores.json"));
    }

    #[test]
    fn test_seed_and_session_length() {
        let settings = Settings {
            seed: Some(17),
            session_secs: 0,
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 17);
        assert_eq!(settings.session_ms(), 1_000);
    }

    #[test]
    fn test_huge_session_length_saturates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, format!(r#"{{"session_secs": {}}}"#, u64::MAX)).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.session_secs, u64::MAX);
        assert_eq!(settings.session_ms(), u64::MAX);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        let settings = Settings {
            difficulty: Difficulty::Hard,
            session_secs: 45,
            seed: Some(3),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"difficulty": "easy"}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.session_secs, 30);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        assert_eq!(Settings::load(&dir.path().join("absent.json")), Settings::default());
    }
}
