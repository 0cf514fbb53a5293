//! Core error types for roadmap-core.
//!
//! Scheduling impossibility is never an error here: an initiative that cannot
//! be placed is reported as a [`crate::model::RiskFlag`]. These types cover
//! malformed input, configuration and snapshot I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for roadmap-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed scheduler input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Active engineer with nothing in the working-day mask
    #[error("Engineer '{engineer_id}' has no working days")]
    EmptyWorkingDays { engineer_id: String },

    /// Working-day index outside 0..=6
    #[error("Engineer '{engineer_id}' has invalid weekday index {day} (expected 0-6)")]
    InvalidWeekday { engineer_id: String, day: u8 },

    #[error("Engineer '{engineer_id}' has invalid weekly capacity {capacity}")]
    InvalidCapacity { engineer_id: String, capacity: f64 },

    /// End date before start date
    #[error("Invalid date range for {owner}: end ({end}) is before start ({start})")]
    InvalidDateRange {
        owner: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Initiative '{initiative_id}' has invalid effort estimate {effort}")]
    InvalidEffort { initiative_id: String, effort: f64 },

    /// Same ID used twice within one entity kind
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: String, id: String },

    /// Pinned engineer missing from the roster
    #[error("Initiative '{initiative_id}' is assigned to unknown engineer '{engineer_id}'")]
    UnknownEngineer {
        initiative_id: String,
        engineer_id: String,
    },

    #[error("Dependency cycle: {}", path.join(" -> "))]
    DependencyCycle { path: Vec<String> },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
