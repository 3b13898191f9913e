mod settings;

pub use settings::{AdjustField, Settings, SettingsStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Overrides the data directory outright.
pub const DATA_DIR_ENV: &str = "CIRCUIT_TIMER_DATA_DIR";
/// `dev` selects `~/.config/circuit-timer-dev/`.
pub const ENV_ENV: &str = "CIRCUIT_TIMER_ENV";

/// Returns `$CIRCUIT_TIMER_DATA_DIR`, or `~/.config/circuit-timer[-dev]/`
/// based on CIRCUIT_TIMER_ENV.
///
/// The directory is not created here; [`SettingsStore::save`] creates it on
/// first write.
///
/// # Errors
/// Returns an error if no override is set and the home directory cannot be
/// determined.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
    let env = std::env::var(ENV_ENV).unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("circuit-timer-dev")
    } else {
        base_dir.join("circuit-timer")
    };
    Ok(dir)
}
