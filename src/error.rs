//! Error types for the fallible edges of the crate.
//!
//! The simulation itself never fails: refused abilities and the loss
//! condition are game rules, not errors. Only loading settings from disk can
//! go wrong.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading or validating [`crate::Settings`].
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for the settings schema.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A value is outside the range the simulation can run with.
    Invalid {
        /// Dotted field name, e.g. `field.width`.
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "failed to read settings '{}': {}", path.display(), source)
            }
            SettingsError::Parse { path, source } => {
                write!(f, "failed to parse settings '{}': {}", path.display(), source)
            }
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse { source, .. } => Some(source),
            SettingsError::Invalid { .. } => None,
        }
    }
}

/// Convenience alias: a `Result` using `SettingsError` as the error type.
pub type SettingsResult<T> = Result<T, SettingsError>;
