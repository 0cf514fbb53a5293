//! Engineer recommendation for a single initiative.
//!
//! Each active engineer gets three independent scores that are summed:
//!
//! | Component | Max | Basis |
//! |-----------|-----|-------|
//! | Specialty | `primary_specialty` | best matching rating tier |
//! | Load | `current_load` | hours already committed this week vs. weekly capacity |
//! | Feasibility | `deadline_feasibility` | hours available before the deadline vs. effort |
//!
//! Every component also contributes a human-readable reason so the ranking can
//! be explained in the UI.

use chrono::NaiveDate;

use super::config::SchedulerConfig;
use crate::calendar::{committed_hours_in, days_inclusive, has_capacity_on, week_end, week_start};
use crate::model::{
    AssignmentRecommendation, Engineer, Initiative, RecommendationBreakdown, SpecialtyLevel,
};

/// Maximum number of engineers returned by [`recommend_engineers`]
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Share of the effort that still earns half feasibility credit
const TIGHT_AVAILABILITY_RATIO: f64 = 0.7;

/// Feasibility credit for initiatives without a deadline or effort
const NO_DEADLINE_CREDIT: f64 = 0.8;

/// A score together with the reason explaining it
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentScore {
    pub score: f64,
    pub reason: String,
}

impl ComponentScore {
    fn new(score: f64, reason: impl Into<String>) -> Self {
        Self {
            score,
            reason: reason.into(),
        }
    }
}

/// Rank active engineers for `initiative`, best first.
///
/// Returns at most [`MAX_RECOMMENDATIONS`] entries. Equal scores keep roster
/// order. An empty or all-inactive roster yields an empty list.
pub fn recommend_engineers(
    initiative: &Initiative,
    engineers: &[Engineer],
    config: &SchedulerConfig,
    today: NaiveDate,
) -> Vec<AssignmentRecommendation> {
    let mut recommendations: Vec<AssignmentRecommendation> = engineers
        .iter()
        .filter(|e| e.is_active)
        .map(|engineer| score_engineer(initiative, engineer, config, today))
        .collect();

    // sort_by is stable; NaN scores compare as equal
    recommendations.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(
        initiative = %initiative.id,
        candidates = recommendations.len(),
        top = recommendations.first().map(|r| r.engineer_id.as_str()).unwrap_or("-"),
        "ranked engineers"
    );

    recommendations
}

/// Score one engineer regardless of their active flag.
pub fn score_engineer(
    initiative: &Initiative,
    engineer: &Engineer,
    config: &SchedulerConfig,
    today: NaiveDate,
) -> AssignmentRecommendation {
    let specialty = specialty_score(initiative, engineer, config);
    let load = load_score(engineer, config, today);
    let feasibility = feasibility_score(initiative, engineer, config, today);

    let breakdown = RecommendationBreakdown {
        specialty_score: specialty.score,
        load_score: load.score,
        feasibility_score: feasibility.score,
    };

    AssignmentRecommendation {
        engineer_id: engineer.id.clone(),
        engineer_name: engineer.name.clone(),
        score: breakdown.total(),
        reasons: vec![specialty.reason, load.reason, feasibility.reason],
        breakdown,
    }
}

/// Best matching specialty tier. Tiers are not summed.
pub fn specialty_score(
    initiative: &Initiative,
    engineer: &Engineer,
    config: &SchedulerConfig,
) -> ComponentScore {
    let weights = &config.weights;

    if initiative.specialties.is_empty() {
        // Partial credit so untagged work is not starved
        return ComponentScore::new(
            weights.secondary_specialty / 2.0,
            "No specialty requirements",
        );
    }

    let mut primary = Vec::new();
    let mut secondary = Vec::new();
    for tag in &initiative.specialties {
        match engineer.level_for(tag) {
            Some(SpecialtyLevel::Primary) => primary.push(tag.as_str()),
            Some(SpecialtyLevel::Secondary) => secondary.push(tag.as_str()),
            None => {}
        }
    }

    if !primary.is_empty() {
        ComponentScore::new(
            weights.primary_specialty,
            format!("Primary expertise in {}", primary.join(", ")),
        )
    } else if !secondary.is_empty() {
        ComponentScore::new(
            weights.secondary_specialty,
            format!("Secondary expertise in {}", secondary.join(", ")),
        )
    } else {
        ComponentScore::new(0.0, "No matching specialties")
    }
}

/// Hours committed in the Monday-start week containing `today`
pub fn current_week_load(engineer: &Engineer, today: NaiveDate) -> f64 {
    let start = week_start(today);
    let end = week_end(today);
    engineer
        .scheduled_blocks
        .iter()
        .map(|block| committed_hours_in(block, start, end))
        .sum()
}

/// Linear decay from the full weight at zero load, floored at zero.
pub fn load_score(engineer: &Engineer, config: &SchedulerConfig, today: NaiveDate) -> ComponentScore {
    let current_load = current_week_load(engineer, today);
    let load_percentage = if engineer.weekly_capacity > 0.0 {
        current_load / engineer.weekly_capacity
    } else {
        1.0
    };

    let score = (config.weights.current_load * (1.0 - load_percentage)).max(0.0);
    ComponentScore::new(
        score,
        format!(
            "Current load: {:.0}h of {:.0}h this week ({:.0}%)",
            current_load,
            engineer.weekly_capacity,
            load_percentage * 100.0
        ),
    )
}

/// Hours the engineer could still contribute in `[today, deadline]`.
///
/// Counts `hours_per_day` for each working, available day and subtracts the
/// pro-rated hours of existing blocks overlapping the window. May be negative.
pub fn available_hours_until(
    engineer: &Engineer,
    config: &SchedulerConfig,
    today: NaiveDate,
    deadline: NaiveDate,
) -> f64 {
    let capacity: f64 = days_inclusive(today, deadline)
        .filter(|day| has_capacity_on(engineer, *day))
        .map(|_| config.hours_per_day)
        .sum();

    let committed: f64 = engineer
        .scheduled_blocks
        .iter()
        .map(|block| committed_hours_in(block, today, deadline))
        .sum();

    capacity - committed
}

pub fn feasibility_score(
    initiative: &Initiative,
    engineer: &Engineer,
    config: &SchedulerConfig,
    today: NaiveDate,
) -> ComponentScore {
    let weight = config.weights.deadline_feasibility;
    let effort_hours = initiative
        .effort_estimate
        .map(|weeks| config.effort_hours(weeks))
        .unwrap_or(0.0);

    let deadline = match initiative.deadline {
        Some(deadline) if effort_hours > 0.0 => deadline,
        _ => return ComponentScore::new(weight * NO_DEADLINE_CREDIT, "No deadline constraint"),
    };

    let availability = available_hours_until(engineer, config, today, deadline);

    if availability >= effort_hours {
        ComponentScore::new(
            weight,
            format!("Can complete before deadline ({availability:.0}h available, {effort_hours:.0}h needed)"),
        )
    } else if availability >= TIGHT_AVAILABILITY_RATIO * effort_hours {
        ComponentScore::new(
            weight / 2.0,
            format!("Tight timeline ({availability:.0}h available, {effort_hours:.0}h needed)"),
        )
    } else {
        ComponentScore::new(
            0.0,
            format!("Insufficient availability before deadline ({availability:.0}h available, {effort_hours:.0}h needed)"),
        )
    }
}
