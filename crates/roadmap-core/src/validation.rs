//! Input validation for scheduler runs.
//!
//! The scheduler itself never fails; callers run these checks first and
//! refuse to schedule malformed rosters or initiatives. All problems are
//! collected rather than stopping at the first one.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, ValidationError};
use crate::model::{DependencyEdge, Engineer, Initiative};
use crate::scheduler::dependency_map;
use crate::snapshot::RoadmapSnapshot;

fn validate_engineer(engineer: &Engineer, problems: &mut Vec<ValidationError>) {
    if engineer.is_active && engineer.working_days.is_empty() {
        problems.push(ValidationError::EmptyWorkingDays {
            engineer_id: engineer.id.clone(),
        });
    }
    for &day in &engineer.working_days {
        if day > 6 {
            problems.push(ValidationError::InvalidWeekday {
                engineer_id: engineer.id.clone(),
                day,
            });
        }
    }
    if !engineer.weekly_capacity.is_finite() || engineer.weekly_capacity < 0.0 {
        problems.push(ValidationError::InvalidCapacity {
            engineer_id: engineer.id.clone(),
            capacity: engineer.weekly_capacity,
        });
    }
    for block in &engineer.unavailability {
        if block.end_date < block.start_date {
            problems.push(ValidationError::InvalidDateRange {
                owner: format!("engineer '{}' unavailability", engineer.id),
                start: block.start_date,
                end: block.end_date,
            });
        }
    }
}

fn validate_initiative(
    initiative: &Initiative,
    roster: &HashSet<&str>,
    problems: &mut Vec<ValidationError>,
) {
    if let Some(effort) = initiative.effort_estimate {
        if !effort.is_finite() || effort < 0.0 {
            problems.push(ValidationError::InvalidEffort {
                initiative_id: initiative.id.clone(),
                effort,
            });
        }
    }
    if let Some((start, end)) = initiative.locked_window() {
        if end < start {
            problems.push(ValidationError::InvalidDateRange {
                owner: format!("initiative '{}' locked window", initiative.id),
                start,
                end,
            });
        }
    }
    if let Some(engineer_id) = initiative.pinned_engineer() {
        if !roster.contains(engineer_id) {
            problems.push(ValidationError::UnknownEngineer {
                initiative_id: initiative.id.clone(),
                engineer_id: engineer_id.to_string(),
            });
        }
    }
}

fn check_duplicates<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    problems: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            problems.push(ValidationError::DuplicateId {
                kind: kind.to_string(),
                id: id.to_string(),
            });
        }
    }
}

/// Every problem found in the inputs of one scheduling run.
///
/// Done initiatives are still checked; inactive engineers may have an empty
/// working-day mask.
pub fn validate_inputs(
    initiatives: &[Initiative],
    engineers: &[Engineer],
    edges: &[DependencyEdge],
) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    check_duplicates("engineer", engineers.iter().map(|e| e.id.as_str()), &mut problems);
    check_duplicates("initiative", initiatives.iter().map(|i| i.id.as_str()), &mut problems);

    for engineer in engineers {
        validate_engineer(engineer, &mut problems);
    }

    let roster: HashSet<&str> = engineers.iter().map(|e| e.id.as_str()).collect();
    for initiative in initiatives {
        validate_initiative(initiative, &roster, &mut problems);
    }

    for path in find_dependency_cycles(initiatives, edges) {
        problems.push(ValidationError::DependencyCycle { path });
    }

    problems
}

pub fn validate_snapshot(snapshot: &RoadmapSnapshot) -> Vec<ValidationError> {
    validate_inputs(&snapshot.initiatives, &snapshot.engineers, &snapshot.dependencies)
}

/// Fail with the first problem, if any.
pub fn ensure_valid(snapshot: &RoadmapSnapshot) -> Result<()> {
    match validate_snapshot(snapshot).into_iter().next() {
        Some(problem) => Err(problem.into()),
        None => Ok(()),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    InProgress,
    Finished,
}

/// Dependency cycles among the given initiatives.
///
/// Each cycle is reported once as the path that closes it, e.g.
/// `["a", "b", "a"]`. Edges to unknown initiatives are ignored. Scheduling
/// output does not depend on this; it is a diagnostic.
pub fn find_dependency_cycles(
    initiatives: &[Initiative],
    edges: &[DependencyEdge],
) -> Vec<Vec<String>> {
    let dependencies = dependency_map(initiatives, edges);
    let known: HashSet<&str> = initiatives.iter().map(|i| i.id.as_str()).collect();

    fn walk<'a>(
        id: &'a str,
        dependencies: &HashMap<&'a str, Vec<&'a str>>,
        known: &HashSet<&str>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        marks.insert(id, Mark::InProgress);
        stack.push(id);

        for &dep in dependencies.get(id).into_iter().flatten() {
            if !known.contains(dep) {
                continue;
            }
            match marks.get(dep) {
                Some(Mark::InProgress) => {
                    let from = stack.iter().position(|s| *s == dep).unwrap_or(0);
                    let mut path: Vec<String> = stack[from..].iter().map(|s| s.to_string()).collect();
                    path.push(dep.to_string());
                    cycles.push(path);
                }
                Some(Mark::Finished) => {}
                None => walk(dep, dependencies, known, marks, stack, cycles),
            }
        }

        stack.pop();
        marks.insert(id, Mark::Finished);
    }

    let mut marks = HashMap::new();
    let mut stack = Vec::new();
    let mut cycles = Vec::new();
    for initiative in initiatives {
        if !marks.contains_key(initiative.id.as_str()) {
            walk(
                initiative.id.as_str(),
                &dependencies,
                &known,
                &mut marks,
                &mut stack,
                &mut cycles,
            );
        }
    }
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn clean_inputs_have_no_problems() {
        let engineers = vec![Engineer::new("e1", "Ada")];
        let initiatives = vec![
            Initiative::new("a", "a").with_effort(1.0).assigned_to("e1"),
            Initiative::new("b", "b").depends_on("a"),
        ];
        assert!(validate_inputs(&initiatives, &engineers, &[]).is_empty());
    }

    #[test]
    fn empty_working_days_only_matter_for_active_engineers() {
        let engineers = vec![
            Engineer::new("active", "Ada").with_working_days([]),
            Engineer::new("gone", "Bob").with_working_days([]).inactive(),
        ];
        let problems = validate_inputs(&[], &engineers, &[]);
        assert_eq!(
            problems,
            vec![ValidationError::EmptyWorkingDays {
                engineer_id: "active".into()
            }]
        );
    }

    #[test]
    fn reports_ranges_effort_weekdays_and_unknown_engineers() {
        let engineers = vec![Engineer::new("e1", "Ada")
            .with_working_days([1, 9])
            .with_capacity(-1.0)
            .with_unavailability(d(2024, 1, 5), d(2024, 1, 1))];
        let initiatives = vec![Initiative::new("i1", "x")
            .with_effort(-2.0)
            .locked(d(2024, 2, 1), d(2024, 1, 1))
            .assigned_to("nobody")];

        let problems = validate_inputs(&initiatives, &engineers, &[]);
        assert_eq!(problems.len(), 6);
        assert!(problems.contains(&ValidationError::InvalidWeekday {
            engineer_id: "e1".into(),
            day: 9
        }));
        assert!(problems.contains(&ValidationError::UnknownEngineer {
            initiative_id: "i1".into(),
            engineer_id: "nobody".into()
        }));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let engineers = vec![Engineer::new("e1", "Ada"), Engineer::new("e1", "Ada again")];
        let problems = validate_inputs(&[], &engineers, &[]);
        assert_eq!(
            problems,
            vec![ValidationError::DuplicateId {
                kind: "engineer".into(),
                id: "e1".into()
            }]
        );
    }

    #[test]
    fn finds_cycles_through_edges_and_own_lists() {
        let initiatives = vec![
            Initiative::new("a", "a").depends_on("b"),
            Initiative::new("b", "b"),
            Initiative::new("c", "c").depends_on("c"),
        ];
        let edges = vec![DependencyEdge::new("b", "a")];
        let cycles = find_dependency_cycles(&initiatives, &edges);
        assert_eq!(
            cycles,
            vec![
                vec!["a".to_string(), "b".to_string(), "a".to_string()],
                vec!["c".to_string(), "c".to_string()],
            ]
        );
    }

    #[test]
    fn acyclic_graph_and_unknown_ids_have_no_cycles() {
        let initiatives = vec![
            Initiative::new("a", "a").depends_on("b").depends_on("ghost"),
            Initiative::new("b", "b").depends_on("c"),
            Initiative::new("c", "c"),
        ];
        assert!(find_dependency_cycles(&initiatives, &[]).is_empty());
    }

    #[test]
    fn ensure_valid_returns_first_problem() {
        let snapshot = RoadmapSnapshot {
            initiatives: vec![Initiative::new("a", "a").depends_on("a")],
            engineers: Vec::new(),
            dependencies: Vec::new(),
        };
        let err = ensure_valid(&snapshot).unwrap_err();
        assert!(err.to_string().contains("Dependency cycle: a -> a"));
    }
}
