//! Capacity-aware roadmap scheduler.
//!
//! This module provides the two scheduling entry points:
//! - [`recommend_engineers`]: rank engineers for a single initiative
//! - [`generate_schedule`]: place every open initiative on the roster,
//!   respecting dependencies, locked commitments and daily capacity
//!
//! Both are pure functions of their inputs and an explicit `today`.
//! [`RoadmapScheduler`] bundles a [`SchedulerConfig`] with them.

pub mod config;
pub mod generator;
pub mod recommender;

use chrono::NaiveDate;

pub use config::{data_dir, SchedulerConfig, ScoringWeights};
pub use generator::{
    dependency_map, find_slot, generate_schedule, processing_order, CapacityLedger, Slot,
};
pub use recommender::{recommend_engineers, score_engineer, MAX_RECOMMENDATIONS};

use crate::model::{AssignmentRecommendation, Initiative, ScheduleResult};
use crate::snapshot::RoadmapSnapshot;

/// Scheduler bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct RoadmapScheduler {
    config: SchedulerConfig,
}

impl RoadmapScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Top engineers for `initiative` from the snapshot's roster
    pub fn recommend(
        &self,
        snapshot: &RoadmapSnapshot,
        initiative: &Initiative,
        today: NaiveDate,
    ) -> Vec<AssignmentRecommendation> {
        recommend_engineers(initiative, &snapshot.engineers, &self.config, today)
    }

    /// Full schedule for the snapshot's open initiatives
    pub fn generate(&self, snapshot: &RoadmapSnapshot, today: NaiveDate) -> ScheduleResult {
        let open: Vec<Initiative> = snapshot.active_initiatives().cloned().collect();
        generate_schedule(
            &open,
            &snapshot.engineers,
            &snapshot.dependencies,
            &self.config,
            today,
        )
    }
}
