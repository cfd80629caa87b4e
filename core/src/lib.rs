use std::time::Duration;

use errors::DirectoryError;

pub mod config;
pub mod errors;
pub mod logger;
pub mod state;

/// Format a duration as `HH:MM:SS.mmm`, hours are omitted when zero.
#[must_use]
#[inline]
pub fn format_duration(duration: &Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let millis = duration.subsec_millis();

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    } else {
        format!("{minutes:02}:{seconds:02}.{millis:03}")
    }
}

/// Get the folio configuration directory.
///
/// Linux: `~/.config/folio`, macOS: `~/Library/Application Support/folio`,
/// Windows: `{FOLDERID_RoamingAppData}\folio\config`.
///
/// # Errors
///
/// Fails if the user's home directory can't be determined.
#[inline]
pub fn get_config_dir() -> Result<std::path::PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "folio")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(DirectoryError::Config)
}

/// Get the folio data directory, where the database lives.
///
/// Linux: `~/.local/share/folio`, macOS: `~/Library/Application Support/folio`,
/// Windows: `{FOLDERID_RoamingAppData}\folio\data`.
///
/// # Errors
///
/// Fails if the user's home directory can't be determined.
#[inline]
pub fn get_data_dir() -> Result<std::path::PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(DirectoryError::Data)
}
