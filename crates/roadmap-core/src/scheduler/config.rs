//! TOML-backed scheduler configuration.
//!
//! Holds the recommender weights and the calendar constants used by the
//! generator. Missing keys fall back to their defaults so a partial file such
//! as
//!
//! ```toml
//! buffer_days = 3
//!
//! [weights]
//! primary_specialty = 50.0
//! ```
//!
//! is accepted. The default location is `~/.config/roadmap-planner/scheduler.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, CoreError, Result};

/// Weights of the recommender's three score components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_primary_specialty")]
    pub primary_specialty: f64,
    #[serde(default = "default_secondary_specialty")]
    pub secondary_specialty: f64,
    #[serde(default = "default_current_load")]
    pub current_load: f64,
    #[serde(default = "default_deadline_feasibility")]
    pub deadline_feasibility: f64,
}

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    /// Days before a deadline that count as the safety buffer
    #[serde(default = "default_buffer_days")]
    pub buffer_days: i64,
    /// Flat daily capacity used during slot search
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
    /// Converts effort estimates (weeks) into hours
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: f64,
}

/// Largest accepted `buffer_days`
pub const MAX_BUFFER_DAYS: i64 = 365;

// Default functions
fn default_primary_specialty() -> f64 {
    40.0
}
fn default_secondary_specialty() -> f64 {
    20.0
}
fn default_current_load() -> f64 {
    25.0
}
fn default_deadline_feasibility() -> f64 {
    15.0
}
fn default_buffer_days() -> i64 {
    2
}
fn default_hours_per_day() -> f64 {
    8.0
}
fn default_hours_per_week() -> f64 {
    40.0
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            primary_specialty: default_primary_specialty(),
            secondary_specialty: default_secondary_specialty(),
            current_load: default_current_load(),
            deadline_feasibility: default_deadline_feasibility(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            buffer_days: default_buffer_days(),
            hours_per_day: default_hours_per_day(),
            hours_per_week: default_hours_per_week(),
        }
    }
}

/// Returns `~/.config/roadmap-planner[-dev]/` based on ROADMAP_ENV.
///
/// Set ROADMAP_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ROADMAP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("roadmap-planner-dev")
    } else {
        base_dir.join("roadmap-planner")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl SchedulerConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => value
                        .parse::<i64>()
                        .map(|v| serde_json::Value::Number(v.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) => {
                        return Err(invalid("cannot overwrite a section".to_string()))
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Check value ranges the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if !(0..=MAX_BUFFER_DAYS).contains(&self.buffer_days) {
            return Err(invalid(
                "buffer_days",
                format!("{} is outside 0..={MAX_BUFFER_DAYS}", self.buffer_days),
            ));
        }
        if !(self.hours_per_day.is_finite() && self.hours_per_day > 0.0 && self.hours_per_day <= 24.0) {
            return Err(invalid(
                "hours_per_day",
                format!("{} is not in (0, 24]", self.hours_per_day),
            ));
        }
        if !(self.hours_per_week.is_finite() && self.hours_per_week > 0.0) {
            return Err(invalid(
                "hours_per_week",
                format!("{} must be positive", self.hours_per_week),
            ));
        }

        let weights = [
            ("weights.primary_specialty", self.weights.primary_specialty),
            ("weights.secondary_specialty", self.weights.secondary_specialty),
            ("weights.current_load", self.weights.current_load),
            ("weights.deadline_feasibility", self.weights.deadline_feasibility),
        ];
        for (key, weight) in weights {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(invalid(key, format!("{weight} must be a non-negative number")));
            }
        }
        Ok(())
    }

    /// Default config path inside [`data_dir`]
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("scheduler.toml"))
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: SchedulerConfig = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path`, returning defaults if it is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable scheduler config");
                }
                Self::default()
            }
        }
    }

    /// Persist to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
            }
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed or
    /// it fails [`SchedulerConfig::validate`]. `self` is left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: SchedulerConfig = serde_json::from_value(json).map_err(|e| {
            CoreError::Config(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Effort in hours for an estimate given in weeks
    pub fn effort_hours(&self, weeks: f64) -> f64 {
        weeks * self.hours_per_week
    }
}
