//! # Roadmap Core Library
//!
//! Scheduling engine for the roadmap planner. Given initiatives (effort,
//! deadlines, dependencies, locks) and a roster of engineers (specialties,
//! capacity, working days, unavailability, existing commitments) it
//!
//! - recommends the best-fit engineers for one initiative, and
//! - generates a forward schedule of work blocks, flagging at-risk and
//!   unschedulable work.
//!
//! ## Architecture
//!
//! - **Scheduler**: pure functions over in-memory data; "today" is always an
//!   explicit argument
//! - **Validation**: input checks callers run before scheduling
//! - **Snapshot**: JSON input/output standing in for the persistence layer
//!
//! ## Key Components
//!
//! - [`recommend_engineers`]: rank engineers for an initiative
//! - [`generate_schedule`]: full-roadmap schedule generation
//! - [`SchedulerConfig`]: weights and calendar constants
//! - [`RoadmapSnapshot`]: typed input and write-back

pub mod calendar;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod snapshot;
pub mod validation;

pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use model::{
    AssignmentRecommendation, DependencyEdge, Engineer, Initiative, InitiativeStatus,
    RecommendationBreakdown, RiskFlag, RiskSeverity, ScheduleResult, ScheduledBlock,
    SpecialtyLevel, SpecialtyRating, UnavailabilityBlock,
};
pub use scheduler::{
    generate_schedule, recommend_engineers, RoadmapScheduler, SchedulerConfig, ScoringWeights,
};
pub use snapshot::RoadmapSnapshot;
pub use validation::{find_dependency_cycles, validate_inputs, validate_snapshot};
