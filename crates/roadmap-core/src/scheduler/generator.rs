//! Forward schedule generation across the whole roadmap.
//!
//! A single greedy pass:
//! 1. Order initiatives by deadline (none last), then priority, pulling each
//!    initiative's dependencies in front of it depth-first.
//! 2. For each initiative pick an engineer (pinned or top recommendation) and
//!    either honour its locked window or search the earliest slot with enough
//!    daily capacity.
//! 3. Record every placement in a run-local capacity ledger so later
//!    initiatives see earlier ones.
//!
//! Impossible work is never an error: it becomes a [`RiskFlag`] and an entry
//! in [`ScheduleResult::unscheduled`].

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use super::config::SchedulerConfig;
use super::recommender::recommend_engineers;
use crate::calendar::{days_inclusive, has_capacity_on, is_business_day, is_unavailable};
use crate::model::{
    DependencyEdge, Engineer, Initiative, RiskFlag, ScheduleResult, ScheduledBlock,
};

/// How far ahead the slot search looks when an initiative has no deadline
pub const LOOKAHEAD_DAYS: i64 = 365;

pub const REASON_NO_EFFORT: &str = "No effort estimate provided";
pub const REASON_NO_ENGINEER: &str = "No suitable engineer found";
pub const REASON_NO_SLOT: &str = "Cannot find available slot for scheduling";
pub const REASON_UNAVAILABLE: &str = "Conflicts with engineer unavailability";
pub const REASON_MISSED_DEADLINE: &str = "Cannot meet deadline";
pub const REASON_BUFFER_EXCEEDED: &str = "Deadline buffer exceeded";

/// Hours already handed out per engineer per day during one run.
///
/// Starts empty: persisted blocks are not consulted here, only placements made
/// by the current run.
#[derive(Debug, Default)]
pub struct CapacityLedger {
    hours: HashMap<String, HashMap<NaiveDate, f64>>,
}

impl CapacityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hours already allocated to `engineer_id` on `date`
    pub fn used(&self, engineer_id: &str, date: NaiveDate) -> f64 {
        self.hours
            .get(engineer_id)
            .and_then(|days| days.get(&date))
            .copied()
            .unwrap_or(0.0)
    }

    /// Spread the block's hours evenly over its business days, each day
    /// capped at `hours_per_day`.
    pub fn record(&mut self, block: &ScheduledBlock, hours_per_day: f64) {
        let business_days: Vec<NaiveDate> = days_inclusive(block.start_date, block.end_date)
            .filter(|day| is_business_day(*day))
            .collect();
        if business_days.is_empty() {
            return;
        }

        let share = (block.hours_allocated / business_days.len() as f64).min(hours_per_day);
        let days = self.hours.entry(block.engineer_id.clone()).or_default();
        for day in business_days {
            let used = days.entry(day).or_insert(0.0);
            *used = (*used + share).min(hours_per_day);
        }
    }
}

/// A contiguous window found by the slot search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub hours: f64,
}

/// Earliest contiguous slot in `[from, until]` accumulating `effort_hours`.
///
/// Each working, available day offers `hours_per_day` minus what the ledger
/// already holds for that day. The slot starts on the first day that offered
/// anything and ends on the day the total was reached.
pub fn find_slot(
    engineer: &Engineer,
    ledger: &CapacityLedger,
    from: NaiveDate,
    until: NaiveDate,
    effort_hours: f64,
    hours_per_day: f64,
) -> Option<Slot> {
    let mut start = None;
    let mut total = 0.0;

    for day in days_inclusive(from, until) {
        if !has_capacity_on(engineer, day) {
            continue;
        }
        let available = hours_per_day - ledger.used(&engineer.id, day);
        if available <= 0.0 {
            continue;
        }
        let first = *start.get_or_insert(day);
        total += available;
        if total >= effort_hours {
            return Some(Slot {
                start: first,
                end: day,
                hours: total,
            });
        }
    }

    None
}

/// Dependency IDs per initiative, merging the initiatives' own lists with
/// the explicit edges. Order of first appearance is kept, duplicates dropped.
pub fn dependency_map<'a>(
    initiatives: &'a [Initiative],
    edges: &'a [DependencyEdge],
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
    let own = initiatives
        .iter()
        .flat_map(|i| i.dependencies.iter().map(move |dep| (i.id.as_str(), dep.as_str())));
    let explicit = edges
        .iter()
        .map(|e| (e.initiative_id.as_str(), e.depends_on_id.as_str()));

    for (id, dep) in own.chain(explicit) {
        let deps = map.entry(id).or_default();
        if !deps.contains(&dep) {
            deps.push(dep);
        }
    }
    map
}

/// Processing order: urgency first, dependencies before dependents.
///
/// Initiatives are sorted by deadline ascending (no deadline last) and
/// priority descending, then visited depth-first so each one's dependencies
/// are appended before it. The visited set stops cycles; members of a cycle
/// end up in whatever order the traversal reaches them.
pub fn processing_order<'a>(
    initiatives: &'a [Initiative],
    dependencies: &HashMap<&str, Vec<&str>>,
) -> Vec<&'a Initiative> {
    let by_id: HashMap<&str, &Initiative> =
        initiatives.iter().map(|i| (i.id.as_str(), i)).collect();

    let mut sorted: Vec<&Initiative> = initiatives.iter().collect();
    sorted.sort_by(|a, b| match (a.deadline, b.deadline) {
        (Some(x), Some(y)) => x.cmp(&y).then(b.priority.cmp(&a.priority)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.priority.cmp(&a.priority),
    });

    fn visit<'a>(
        initiative: &'a Initiative,
        by_id: &HashMap<&str, &'a Initiative>,
        dependencies: &HashMap<&str, Vec<&str>>,
        visited: &mut HashSet<&'a str>,
        order: &mut Vec<&'a Initiative>,
    ) {
        if !visited.insert(initiative.id.as_str()) {
            return;
        }
        if let Some(deps) = dependencies.get(initiative.id.as_str()) {
            for dep in deps {
                if let Some(&dependency) = by_id.get(*dep) {
                    visit(dependency, by_id, dependencies, visited, order);
                }
            }
        }
        order.push(initiative);
    }

    let mut visited = HashSet::new();
    let mut order = Vec::with_capacity(initiatives.len());
    for initiative in sorted {
        visit(initiative, &by_id, dependencies, &mut visited, &mut order);
    }
    order
}

/// The engineer chosen for an initiative.
struct Assignee<'a> {
    id: String,
    /// `None` when a pinned engineer is not on the active roster
    engineer: Option<&'a Engineer>,
}

/// One scheduling run. All state is scratch and dropped with the run.
struct ScheduleRun<'a> {
    engineers: &'a [Engineer],
    config: &'a SchedulerConfig,
    today: NaiveDate,
    ledger: CapacityLedger,
    completions: HashMap<&'a str, NaiveDate>,
    result: ScheduleResult,
}

impl<'a> ScheduleRun<'a> {
    fn new(engineers: &'a [Engineer], config: &'a SchedulerConfig, today: NaiveDate) -> Self {
        Self {
            engineers,
            config,
            today,
            ledger: CapacityLedger::new(),
            completions: HashMap::new(),
            result: ScheduleResult::default(),
        }
    }

    fn active_engineer(&self, id: &str) -> Option<&'a Engineer> {
        self.engineers.iter().find(|e| e.is_active && e.id == id)
    }

    /// Pinned engineer if any, otherwise the top recommendation
    fn resolve_assignee(&self, initiative: &Initiative) -> Option<Assignee<'a>> {
        if let Some(pinned) = initiative.pinned_engineer() {
            return Some(Assignee {
                id: pinned.to_string(),
                engineer: self.active_engineer(pinned),
            });
        }

        let top = recommend_engineers(initiative, self.engineers, self.config, self.today)
            .into_iter()
            .next()?;
        Some(Assignee {
            engineer: self.active_engineer(&top.engineer_id),
            id: top.engineer_id,
        })
    }

    /// Day after the latest end among dependencies placed so far, or today
    fn earliest_start(&self, dependencies: Option<&Vec<&str>>) -> NaiveDate {
        dependencies
            .into_iter()
            .flatten()
            .filter_map(|dep| self.completions.get(*dep))
            .max()
            .map(|end| (*end + Duration::days(1)).max(self.today))
            .unwrap_or(self.today)
    }

    fn reject(&mut self, initiative: &Initiative, risk: RiskFlag) {
        tracing::debug!(initiative = %initiative.id, reason = %risk.reason, "initiative left unscheduled");
        self.result.risks.push(risk);
        self.result.unscheduled.push(initiative.id.clone());
    }

    fn place(&mut self, initiative: &'a Initiative, block: ScheduledBlock) {
        tracing::debug!(
            initiative = %initiative.id,
            engineer = %block.engineer_id,
            start = %block.start_date,
            end = %block.end_date,
            at_risk = block.is_at_risk,
            "placed block"
        );
        self.ledger.record(&block, self.config.hours_per_day);
        self.completions.insert(initiative.id.as_str(), block.end_date);
        self.result.blocks.push(block);
    }

    fn schedule(&mut self, initiative: &'a Initiative, dependencies: Option<&Vec<&str>>) {
        if initiative.is_done() {
            return;
        }

        let Some(weeks) = initiative.effort_estimate else {
            self.reject(initiative, RiskFlag::warning(&initiative.id, REASON_NO_EFFORT));
            return;
        };
        let effort_hours = self.config.effort_hours(weeks);

        match initiative.locked_window() {
            Some((start, end)) => self.schedule_locked(initiative, start, end, effort_hours),
            None => {
                let earliest = self.earliest_start(dependencies);
                self.schedule_free(initiative, earliest, effort_hours);
            }
        }
    }

    /// Locked dates are never moved, even onto unavailable days.
    fn schedule_locked(
        &mut self,
        initiative: &'a Initiative,
        start: NaiveDate,
        end: NaiveDate,
        effort_hours: f64,
    ) {
        let Some(assignee) = self.resolve_assignee(initiative) else {
            self.reject(initiative, RiskFlag::critical(&initiative.id, REASON_NO_ENGINEER));
            return;
        };

        let conflicts = assignee
            .engineer
            .is_some_and(|e| is_unavailable(e, start) || is_unavailable(e, end));

        let mut block = ScheduledBlock::new(&initiative.id, assignee.id, start, end, effort_hours);
        if conflicts {
            block = block.at_risk(REASON_UNAVAILABLE);
            self.result
                .risks
                .push(RiskFlag::critical(&initiative.id, REASON_UNAVAILABLE));
        }
        self.place(initiative, block);
    }

    fn schedule_free(&mut self, initiative: &'a Initiative, earliest: NaiveDate, effort_hours: f64) {
        let Some(engineer) = self.resolve_assignee(initiative).and_then(|a| a.engineer) else {
            self.reject(initiative, RiskFlag::critical(&initiative.id, REASON_NO_ENGINEER));
            return;
        };

        let until = initiative
            .deadline
            .unwrap_or(self.today + Duration::days(LOOKAHEAD_DAYS));

        let Some(slot) = find_slot(
            engineer,
            &self.ledger,
            earliest,
            until,
            effort_hours,
            self.config.hours_per_day,
        ) else {
            self.reject(initiative, RiskFlag::critical(&initiative.id, REASON_NO_SLOT));
            return;
        };

        let mut block = ScheduledBlock::new(&initiative.id, &engineer.id, slot.start, slot.end, effort_hours);
        if let Some(deadline) = initiative.deadline {
            if slot.end > deadline {
                block = block.at_risk(REASON_MISSED_DEADLINE);
                self.result
                    .risks
                    .push(RiskFlag::critical(&initiative.id, REASON_MISSED_DEADLINE));
            } else if slot.end > buffer_start(deadline, self.config.buffer_days) {
                block = block.at_risk(REASON_BUFFER_EXCEEDED);
                self.result
                    .risks
                    .push(RiskFlag::warning(&initiative.id, REASON_BUFFER_EXCEEDED));
            }
        }
        self.place(initiative, block);
    }
}

/// First day of the safety buffer before `deadline`.
///
/// A non-positive buffer is empty. One reaching past the calendar's lower
/// bound covers every date.
fn buffer_start(deadline: NaiveDate, buffer_days: i64) -> NaiveDate {
    if buffer_days <= 0 {
        return deadline;
    }
    Duration::try_days(buffer_days)
        .and_then(|buffer| deadline.checked_sub_signed(buffer))
        .unwrap_or(NaiveDate::MIN)
}

/// Generate a forward schedule for every non-done initiative.
///
/// `dependency_edges` is merged with each initiative's own `dependencies`.
/// Deterministic for identical inputs and `today`.
pub fn generate_schedule(
    initiatives: &[Initiative],
    engineers: &[Engineer],
    dependency_edges: &[DependencyEdge],
    config: &SchedulerConfig,
    today: NaiveDate,
) -> ScheduleResult {
    let dependencies = dependency_map(initiatives, dependency_edges);

    for cycle in crate::validation::find_dependency_cycles(initiatives, dependency_edges) {
        tracing::warn!(cycle = %cycle.join(" -> "), "dependency cycle; members scheduled in traversal order");
    }

    let mut run = ScheduleRun::new(engineers, config, today);
    for initiative in processing_order(initiatives, &dependencies) {
        run.schedule(initiative, dependencies.get(initiative.id.as_str()));
    }

    let result = run.result;
    tracing::info!(
        blocks = result.blocks.len(),
        risks = result.risks.len(),
        unscheduled = result.unscheduled.len(),
        "schedule generated"
    );
    result
}
