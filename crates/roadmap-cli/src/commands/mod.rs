pub mod config;
pub mod recommend;
pub mod schedule;
pub mod validate;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use roadmap_core::{RoadmapSnapshot, SchedulerConfig};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Explicit `--config` path or the default location
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(SchedulerConfig::default_path()?),
    }
}

pub fn load_config(explicit: Option<PathBuf>) -> Result<SchedulerConfig, Box<dyn std::error::Error>> {
    Ok(SchedulerConfig::load_or_default(&config_path(explicit)?))
}

/// `--today` or the local calendar date
pub fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

/// Load a snapshot and refuse to continue if it is malformed
pub fn load_valid_snapshot(path: &Path) -> Result<RoadmapSnapshot, Box<dyn std::error::Error>> {
    let snapshot = RoadmapSnapshot::load(path)?;
    let problems = roadmap_core::validate_snapshot(&snapshot);
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("invalid input: {problem}");
        }
        return Err(format!("{} validation problem(s) in {}", problems.len(), path.display()).into());
    }
    Ok(snapshot)
}
