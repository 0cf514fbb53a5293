//! Domain types consumed and produced by the scheduler.
//!
//! Every type here is a read-only snapshot supplied by the caller (engineers,
//! initiatives, dependency edges) or a value produced by one scheduling run
//! (blocks, risks, recommendations). Wire names are camelCase to match the
//! planner's JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How strongly an engineer is rated in a specialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialtyLevel {
    Primary,
    Secondary,
}

/// A single `(specialty, level)` rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyRating {
    pub specialty: String,
    pub level: SpecialtyLevel,
}

impl SpecialtyRating {
    pub fn new(specialty: impl Into<String>, level: SpecialtyLevel) -> Self {
        Self {
            specialty: specialty.into(),
            level,
        }
    }
}

/// Closed date interval during which an engineer has zero capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailabilityBlock {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

impl UnavailabilityBlock {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            reason: None,
        }
    }

    /// Check if `date` falls inside the interval (both ends inclusive)
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A unit of planned work: one initiative on one engineer over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledBlock {
    pub initiative_id: String,
    pub engineer_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours_allocated: f64,
    #[serde(default)]
    pub is_at_risk: bool,
    #[serde(default)]
    pub risk_reason: Option<String>,
}

impl ScheduledBlock {
    /// Create a block that is not at risk
    pub fn new(
        initiative_id: impl Into<String>,
        engineer_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        hours_allocated: f64,
    ) -> Self {
        Self {
            initiative_id: initiative_id.into(),
            engineer_id: engineer_id.into(),
            start_date,
            end_date,
            hours_allocated,
            is_at_risk: false,
            risk_reason: None,
        }
    }

    /// Flag the block as at risk with a reason
    pub fn at_risk(mut self, reason: impl Into<String>) -> Self {
        self.is_at_risk = true;
        self.risk_reason = Some(reason.into());
        self
    }
}

/// An engineer on the roster, already expanded with ratings,
/// unavailability and current commitments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Hours per week
    #[serde(default = "default_weekly_capacity")]
    pub weekly_capacity: f64,
    /// Weekday indices, 0 = Sunday ... 6 = Saturday
    #[serde(default = "default_working_days")]
    pub working_days: Vec<u8>,
    #[serde(default)]
    pub specialties: Vec<SpecialtyRating>,
    #[serde(default)]
    pub unavailability: Vec<UnavailabilityBlock>,
    #[serde(default)]
    pub scheduled_blocks: Vec<ScheduledBlock>,
}

fn default_true() -> bool {
    true
}

fn default_weekly_capacity() -> f64 {
    40.0
}

fn default_working_days() -> Vec<u8> {
    vec![1, 2, 3, 4, 5]
}

impl Engineer {
    /// Active full-time engineer working Monday to Friday
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            weekly_capacity: default_weekly_capacity(),
            working_days: default_working_days(),
            specialties: Vec::new(),
            unavailability: Vec::new(),
            scheduled_blocks: Vec::new(),
        }
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>, level: SpecialtyLevel) -> Self {
        self.specialties.push(SpecialtyRating::new(specialty, level));
        self
    }

    pub fn with_capacity(mut self, weekly_capacity: f64) -> Self {
        self.weekly_capacity = weekly_capacity;
        self
    }

    pub fn with_working_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.working_days = days.into_iter().collect();
        self
    }

    pub fn with_unavailability(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.unavailability.push(UnavailabilityBlock::new(start, end));
        self
    }

    pub fn with_block(mut self, block: ScheduledBlock) -> Self {
        self.scheduled_blocks.push(block);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Best rating this engineer holds for a specialty tag (case-insensitive)
    pub fn level_for(&self, specialty: &str) -> Option<SpecialtyLevel> {
        let mut best = None;
        for rating in &self.specialties {
            if !rating.specialty.eq_ignore_ascii_case(specialty) {
                continue;
            }
            match rating.level {
                SpecialtyLevel::Primary => return Some(SpecialtyLevel::Primary),
                SpecialtyLevel::Secondary => best = Some(SpecialtyLevel::Secondary),
            }
        }
        best
    }
}

/// Lifecycle stage of an initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InitiativeStatus {
    Idea,
    #[default]
    Planned,
    InProgress,
    Blocked,
    Done,
}

/// A piece of roadmap work to be assigned and scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Effort in engineer-weeks; `None` means the initiative cannot be scheduled
    #[serde(default)]
    pub effort_estimate: Option<f64>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Higher is more urgent
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub status: InitiativeStatus,
    #[serde(default)]
    pub lock_dates: bool,
    #[serde(default)]
    pub locked_start: Option<NaiveDate>,
    #[serde(default)]
    pub locked_end: Option<NaiveDate>,
    #[serde(default)]
    pub lock_assignment: bool,
    #[serde(default)]
    pub assigned_engineer_id: Option<String>,
    /// Required specialty tags
    #[serde(default)]
    pub specialties: Vec<String>,
    /// IDs of initiatives this one depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Initiative {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            effort_estimate: None,
            deadline: None,
            priority: 0,
            status: InitiativeStatus::default(),
            lock_dates: false,
            locked_start: None,
            locked_end: None,
            lock_assignment: false,
            assigned_engineer_id: None,
            specialties: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_effort(mut self, weeks: f64) -> Self {
        self.effort_estimate = Some(weeks);
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: InitiativeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_specialty(mut self, tag: impl Into<String>) -> Self {
        self.specialties.push(tag.into());
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Pin the date window
    pub fn locked(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.lock_dates = true;
        self.locked_start = Some(start);
        self.locked_end = Some(end);
        self
    }

    /// Pin the engineer
    pub fn assigned_to(mut self, engineer_id: impl Into<String>) -> Self {
        self.lock_assignment = true;
        self.assigned_engineer_id = Some(engineer_id.into());
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == InitiativeStatus::Done
    }

    /// Locked window, if dates are locked and both ends are set
    pub fn locked_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        if !self.lock_dates {
            return None;
        }
        match (self.locked_start, self.locked_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Engineer pinned by `lock_assignment` or an existing assignment
    pub fn pinned_engineer(&self) -> Option<&str> {
        self.assigned_engineer_id.as_deref()
    }
}

/// Dependency edge: `initiative_id` cannot start before `depends_on_id` ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub initiative_id: String,
    pub depends_on_id: String,
}

impl DependencyEdge {
    pub fn new(initiative_id: impl Into<String>, depends_on_id: impl Into<String>) -> Self {
        Self {
            initiative_id: initiative_id.into(),
            depends_on_id: depends_on_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    /// Heuristic concern; the schedule is still usable
    Warning,
    /// A hard constraint (deadline, availability, assignment) was not honoured
    Critical,
}

/// A risk raised for one initiative during a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlag {
    pub initiative_id: String,
    pub reason: String,
    pub severity: RiskSeverity,
}

impl RiskFlag {
    pub fn warning(initiative_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            initiative_id: initiative_id.into(),
            reason: reason.into(),
            severity: RiskSeverity::Warning,
        }
    }

    pub fn critical(initiative_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            initiative_id: initiative_id.into(),
            reason: reason.into(),
            severity: RiskSeverity::Critical,
        }
    }
}

/// Per-component scores behind a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBreakdown {
    pub specialty_score: f64,
    pub load_score: f64,
    pub feasibility_score: f64,
}

impl RecommendationBreakdown {
    pub fn total(&self) -> f64 {
        self.specialty_score + self.load_score + self.feasibility_score
    }
}

/// One ranked engineer for an initiative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecommendation {
    pub engineer_id: String,
    pub engineer_name: String,
    pub score: f64,
    pub reasons: Vec<String>,
    pub breakdown: RecommendationBreakdown,
}

/// Output of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub blocks: Vec<ScheduledBlock>,
    pub risks: Vec<RiskFlag>,
    pub unscheduled: Vec<String>,
}

impl ScheduleResult {
    pub fn block_for(&self, initiative_id: &str) -> Option<&ScheduledBlock> {
        self.blocks.iter().find(|b| b.initiative_id == initiative_id)
    }

    pub fn has_critical(&self) -> bool {
        self.risks.iter().any(|r| r.severity == RiskSeverity::Critical)
    }
}
