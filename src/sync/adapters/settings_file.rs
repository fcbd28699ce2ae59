//! Loads persisted settings from a JSON document.

use crate::sync::domain::SyncSettings;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use thiserror::Error;

/// Errors raised while reading a settings file.
#[derive(Debug, Error)]
pub enum SettingsFileError {
    /// The path does not name a file.
    #[error("settings path must include a file name: {0}")]
    MissingFileName(String),

    /// The file or its directory could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not a valid settings document.
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: String,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },
}

/// Reads [`SyncSettings`] from a JSON file.
///
/// Keys follow the persisted `PascalCase` naming (`TargetList`,
/// `StatusChangeTrashed`, ...). Missing keys take their defaults.
///
/// # Errors
///
/// Returns [`SettingsFileError`] when the file cannot be opened, read, or
/// parsed.
pub fn load_settings(path: &Utf8Path) -> Result<SyncSettings, SettingsFileError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SettingsFileError::MissingFileName(path.to_string()))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let io_error = |source| SettingsFileError::Io {
        path: path.to_string(),
        source,
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    let contents = dir.read_to_string(file_name).map_err(io_error)?;
    serde_json::from_str(&contents).map_err(|source| SettingsFileError::Parse {
        path: path.to_string(),
        source,
    })
}
