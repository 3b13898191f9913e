//! Core error types for circuit-timer-core.
//!
//! The timer state machine itself never fails; these errors come from the
//! edges around it (settings files, the remote backend, user edits).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for circuit-timer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Remote backend errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Custom(String),
}

/// Settings-file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home directory could not be resolved and no override was given
    #[error("No data directory available")]
    NoDataDir,
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A duration or count that must be positive was zero
    #[error("'{field}' must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unknown exercise id: {0}")]
    UnknownExercise(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
