//! Integration tests for full-roadmap schedule generation.

use chrono::{Duration, NaiveDate};
use roadmap_core::{
    generate_schedule, recommend_engineers, DependencyEdge, Engineer, Initiative,
    InitiativeStatus, RiskFlag, RiskSeverity, ScheduledBlock, SchedulerConfig, SpecialtyLevel,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Monday 2024-01-01
fn monday() -> NaiveDate {
    d(2024, 1, 1)
}

#[test]
fn one_week_initiative_fills_the_next_working_week() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")];
    let initiatives = vec![Initiative::new("i1", "Search").with_effort(1.0)];

    // Saturday: first working day is Monday the 8th
    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, d(2024, 1, 6));

    assert_eq!(result.blocks.len(), 1);
    let block = &result.blocks[0];
    assert_eq!(block.engineer_id, "e1");
    assert_eq!(block.start_date, d(2024, 1, 8));
    assert_eq!(block.end_date, d(2024, 1, 12));
    assert_eq!(block.hours_allocated, 40.0);
    assert!(!block.is_at_risk);
    assert!(result.risks.is_empty());
    assert!(result.unscheduled.is_empty());
}

#[test]
fn deadline_before_today_is_unscheduled_with_critical_risk() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")];
    let today = d(2024, 1, 10);
    let initiatives = vec![Initiative::new("late", "Late")
        .with_effort(1.0)
        .with_deadline(today - Duration::days(1))];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, today);

    assert!(result.blocks.is_empty());
    assert_eq!(result.unscheduled, vec!["late"]);
    assert_eq!(
        result.risks,
        vec![RiskFlag::critical("late", "Cannot find available slot for scheduling")]
    );
}

#[test]
fn deadline_too_close_for_the_effort_is_unscheduled() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")];
    // Two weeks of work, one week of runway
    let initiatives = vec![Initiative::new("big", "Big")
        .with_effort(2.0)
        .with_deadline(d(2024, 1, 7))];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    assert_eq!(result.unscheduled, vec!["big"]);
    assert!(result.has_critical());
}

#[test]
fn dependent_starts_after_dependency_ends() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada"), Engineer::new("e2", "Bob")];
    let initiatives = vec![
        Initiative::new("ui", "UI")
            .with_effort(1.0)
            .with_deadline(d(2024, 2, 1))
            .assigned_to("e2"),
        Initiative::new("api", "API")
            .with_effort(1.0)
            .with_deadline(d(2024, 3, 1))
            .assigned_to("e1"),
    ];
    let edges = vec![DependencyEdge::new("ui", "api")];

    let result = generate_schedule(&initiatives, &engineers, &edges, &cfg, monday());

    let api = result.block_for("api").unwrap();
    let ui = result.block_for("ui").unwrap();
    assert_eq!(api.start_date, d(2024, 1, 1));
    assert_eq!(api.end_date, d(2024, 1, 5));
    assert!(ui.start_date >= api.end_date + Duration::days(1));
    // Saturday is the earliest start; the first working day is Monday
    assert_eq!(ui.start_date, d(2024, 1, 8));
    // Dependency is placed before the dependent even with a later deadline
    assert_eq!(result.blocks[0].initiative_id, "api");
}

#[test]
fn dependency_chain_through_initiative_lists() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada"), Engineer::new("e2", "Bob")];
    let initiatives = vec![
        Initiative::new("c", "c").with_effort(0.4).depends_on("b").assigned_to("e1"),
        Initiative::new("b", "b").with_effort(0.4).depends_on("a").assigned_to("e2"),
        Initiative::new("a", "a").with_effort(0.4).assigned_to("e1"),
    ];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());

    let a = result.block_for("a").unwrap();
    let b = result.block_for("b").unwrap();
    let c = result.block_for("c").unwrap();
    // 16h = two days each
    assert_eq!((a.start_date, a.end_date), (d(2024, 1, 1), d(2024, 1, 2)));
    assert_eq!((b.start_date, b.end_date), (d(2024, 1, 3), d(2024, 1, 4)));
    assert_eq!((c.start_date, c.end_date), (d(2024, 1, 5), d(2024, 1, 8)));
}

#[test]
fn unscheduled_dependency_does_not_delay_dependent() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")];
    let initiatives = vec![
        Initiative::new("base", "Base"),
        Initiative::new("top", "Top").with_effort(1.0).depends_on("base"),
    ];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());

    assert_eq!(result.unscheduled, vec!["base"]);
    assert_eq!(result.risks[0].severity, RiskSeverity::Warning);
    assert_eq!(result.block_for("top").unwrap().start_date, monday());
}

#[test]
fn locked_window_is_kept_exactly_despite_capacity_and_unavailability() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada").with_unavailability(d(2024, 1, 15), d(2024, 1, 16))];
    let initiatives = vec![
        // Three weeks of effort squeezed into one locked week
        Initiative::new("locked", "Launch")
            .with_effort(3.0)
            .locked(d(2024, 1, 15), d(2024, 1, 19))
            .assigned_to("e1"),
        Initiative::new("also-locked", "Docs")
            .with_effort(1.0)
            .locked(d(2024, 1, 8), d(2024, 1, 12)),
    ];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());

    let locked = result.block_for("locked").unwrap();
    assert_eq!(locked.start_date, d(2024, 1, 15));
    assert_eq!(locked.end_date, d(2024, 1, 19));
    assert_eq!(locked.hours_allocated, 120.0);
    assert!(locked.is_at_risk);
    assert_eq!(locked.risk_reason.as_deref(), Some("Conflicts with engineer unavailability"));
    assert!(result
        .risks
        .contains(&RiskFlag::critical("locked", "Conflicts with engineer unavailability")));

    // Unpinned locked work goes to the top recommendation
    let other = result.block_for("also-locked").unwrap();
    assert_eq!(other.engineer_id, "e1");
    assert_eq!((other.start_date, other.end_date), (d(2024, 1, 8), d(2024, 1, 12)));
    assert!(!other.is_at_risk);
}

#[test]
fn locked_window_conflicts_when_only_the_end_date_is_unavailable() {
    let cfg = SchedulerConfig::default();
    // Off on the Friday only; Monday to Thursday are free
    let engineers = vec![Engineer::new("e1", "Ada").with_unavailability(d(2024, 1, 19), d(2024, 1, 19))];
    let initiatives = vec![Initiative::new("locked", "Launch")
        .with_effort(1.0)
        .locked(d(2024, 1, 15), d(2024, 1, 19))
        .assigned_to("e1")];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());

    let block = result.block_for("locked").unwrap();
    assert_eq!((block.start_date, block.end_date), (d(2024, 1, 15), d(2024, 1, 19)));
    assert!(block.is_at_risk);
    assert_eq!(block.risk_reason.as_deref(), Some("Conflicts with engineer unavailability"));
    assert_eq!(
        result.risks,
        vec![RiskFlag::critical("locked", "Conflicts with engineer unavailability")]
    );
}

#[test]
fn locked_window_ignores_unavailability_strictly_inside_it() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada").with_unavailability(d(2024, 1, 16), d(2024, 1, 18))];
    let initiatives = vec![Initiative::new("locked", "Launch")
        .with_effort(1.0)
        .locked(d(2024, 1, 15), d(2024, 1, 19))
        .assigned_to("e1")];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());

    assert!(!result.block_for("locked").unwrap().is_at_risk);
    assert!(result.risks.is_empty());
}

#[test]
fn locked_work_consumes_capacity_for_later_initiatives() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")];
    let initiatives = vec![
        Initiative::new("locked", "Locked")
            .with_effort(1.0)
            .locked(d(2024, 1, 1), d(2024, 1, 5))
            .assigned_to("e1"),
        Initiative::new("free", "Free").with_effort(1.0),
    ];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    let free = result.block_for("free").unwrap();
    assert_eq!(free.start_date, d(2024, 1, 8));
}

#[test]
fn locked_pinned_engineer_off_roster_is_still_honoured() {
    let cfg = SchedulerConfig::default();
    let initiatives = vec![Initiative::new("legacy", "Legacy")
        .with_effort(1.0)
        .locked(d(2024, 1, 1), d(2024, 1, 5))
        .assigned_to("former")];

    let result = generate_schedule(&initiatives, &[], &[], &cfg, monday());
    let block = result.block_for("legacy").unwrap();
    assert_eq!(block.engineer_id, "former");
    assert!(!block.is_at_risk);
}

#[test]
fn locked_without_any_engineer_is_critical() {
    let cfg = SchedulerConfig::default();
    let initiatives = vec![Initiative::new("orphan", "Orphan")
        .with_effort(1.0)
        .locked(d(2024, 1, 1), d(2024, 1, 5))];

    let result = generate_schedule(&initiatives, &[], &[], &cfg, monday());
    assert_eq!(result.unscheduled, vec!["orphan"]);
    assert_eq!(result.risks, vec![RiskFlag::critical("orphan", "No suitable engineer found")]);
}

#[test]
fn done_and_effortless_initiatives_never_get_blocks() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")];
    let initiatives = vec![
        Initiative::new("done", "Done")
            .with_effort(1.0)
            .with_status(InitiativeStatus::Done),
        Initiative::new("done-locked", "Done locked")
            .with_effort(1.0)
            .with_status(InitiativeStatus::Done)
            .locked(d(2024, 1, 1), d(2024, 1, 5)),
        Initiative::new("vague", "Vague"),
    ];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    assert!(result.blocks.is_empty());
    assert_eq!(result.unscheduled, vec!["vague"]);
}

#[test]
fn persisted_blocks_do_not_reduce_slot_capacity() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada").with_block(ScheduledBlock::new(
        "existing",
        "e1",
        d(2024, 1, 1),
        d(2024, 1, 5),
        40.0,
    ))];
    let initiatives = vec![Initiative::new("new", "New").with_effort(1.0)];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    assert_eq!(result.block_for("new").unwrap().start_date, monday());
}

#[test]
fn part_time_engineer_gets_full_daily_hours() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada").with_capacity(20.0)];
    let initiatives = vec![Initiative::new("i1", "x").with_effort(1.0)];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    let block = result.block_for("i1").unwrap();
    assert_eq!(block.end_date, d(2024, 1, 5));
}

#[test]
fn weekend_workers_and_unavailability_shape_the_slot() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")
        .with_working_days([0, 6])
        .with_unavailability(d(2024, 1, 6), d(2024, 1, 6))];
    let initiatives = vec![Initiative::new("i1", "x").with_effort(0.4)];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    let block = result.block_for("i1").unwrap();
    // Sun 7th, then Sat 13th
    assert_eq!(block.start_date, d(2024, 1, 7));
    assert_eq!(block.end_date, d(2024, 1, 13));
}

#[test]
fn specialist_is_chosen_for_tagged_work() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![
        Engineer::new("generalist", "Gen"),
        Engineer::new("mobile", "Mo").with_specialty("ios", SpecialtyLevel::Primary),
    ];
    let initiatives = vec![Initiative::new("app", "App").with_effort(1.0).with_specialty("ios")];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    assert_eq!(result.block_for("app").unwrap().engineer_id, "mobile");
}

#[test]
fn cycles_are_tolerated() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![Engineer::new("e1", "Ada")];
    let initiatives = vec![
        Initiative::new("a", "a").with_effort(1.0).depends_on("b"),
        Initiative::new("b", "b").with_effort(1.0).depends_on("a"),
    ];

    let result = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    assert_eq!(result.blocks.len(), 2);
    assert!(result.unscheduled.is_empty());
}

#[test]
fn generation_and_recommendation_are_deterministic() {
    let cfg = SchedulerConfig::default();
    let engineers = vec![
        Engineer::new("e1", "Ada").with_specialty("data", SpecialtyLevel::Secondary),
        Engineer::new("e2", "Bob").with_block(ScheduledBlock::new("x", "e2", d(2024, 1, 1), d(2024, 1, 3), 24.0)),
        Engineer::new("e3", "Cy").with_specialty("data", SpecialtyLevel::Primary),
    ];
    let initiatives = vec![
        Initiative::new("etl", "ETL")
            .with_effort(2.0)
            .with_deadline(d(2024, 2, 1))
            .with_specialty("data"),
        Initiative::new("dash", "Dashboards").with_effort(1.0).depends_on("etl"),
        Initiative::new("misc", "Misc").with_effort(0.5).with_priority(3),
    ];

    let first = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    let second = generate_schedule(&initiatives, &engineers, &[], &cfg, monday());
    assert_eq!(first, second);

    let recs_a = recommend_engineers(&initiatives[0], &engineers, &cfg, monday());
    let recs_b = recommend_engineers(&initiatives[0], &engineers, &cfg, monday());
    assert_eq!(recs_a, recs_b);
    assert_eq!(recs_a[0].engineer_id, "e3");
}
