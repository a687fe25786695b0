//! Session settings
//!
//! One configuration struct replaces ambient globals: the field size flows
//! into bounds checks and spawn logic from here. Loaded from JSON; every
//! field is optional and falls back to the defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::SpriteSizes;
use crate::consts::*;
use crate::error::{SettingsError, SettingsResult};
use crate::sim::Field;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play-field dimensions
    pub field: Field,
    /// Simulation steps per second
    pub frame_rate: u32,
    /// Frames to hold the final picture after a lethal hit
    pub game_over_delay_frames: u32,
    /// Number of beams in a fan shot
    pub spread_count: usize,
    /// Sprite bounding sizes
    pub sprites: SpriteSizes,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: Field::default(),
            frame_rate: FRAME_RATE,
            game_over_delay_frames: GAME_OVER_DELAY_FRAMES,
            spread_count: SPREAD_COUNT,
            sprites: SpriteSizes::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str, origin: &Path) -> SettingsResult<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|source| SettingsError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.field.width > 0.0) {
            return Err(SettingsError::Invalid {
                field: "field.width",
                reason: "must be positive",
            });
        }
        if !(self.field.height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "field.height",
                reason: "must be positive",
            });
        }
        // Enemies pick a stop altitude in [ENEMY_STOP_MIN, height / 2]
        if self.field.height / 2.0 < ENEMY_STOP_MIN as f32 {
            return Err(SettingsError::Invalid {
                field: "field.height",
                reason: "must leave room for enemies to stop",
            });
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid {
                field: "frame_rate",
                reason: "must be positive",
            });
        }
        if self.spread_count == 0 {
            return Err(SettingsError::Invalid {
                field: "spread_count",
                reason: "must fire at least one beam",
            });
        }
        if !self.sprites.is_valid() {
            return Err(SettingsError::Invalid {
                field: "sprites",
                reason: "sizes must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.field.width, 1100.0);
        assert_eq!(settings.field.height, 650.0);
        assert_eq!(settings.frame_rate, 50);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{"spread_count": 3}"#, Path::new("inline")).unwrap();
        assert_eq!(settings.spread_count, 3);
        assert_eq!(settings.field, Field::default());
    }

    #[test]
    fn test_rejects_zero_spread() {
        let err = Settings::from_json(r#"{"spread_count": 0}"#, Path::new("inline")).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "spread_count", .. }));
    }

    #[test]
    fn test_rejects_tiny_field() {
        let json = r#"{"field": {"width": 300.0, "height": 80.0}}"#;
        let err = Settings::from_json(json, Path::new("inline")).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "field.height", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"frame_rate": 30, "game_over_delay_frames": 60}}"#).unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.game_over_delay_frames, 60);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));

        let fallback = Settings::load_or_default(file.path());
        assert_eq!(fallback, Settings::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
