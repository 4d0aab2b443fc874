use chrono::NaiveDate;
use homework_planner::{
    Assignment, AssignmentValidationError, Planner, PlanningRange, ScheduledTaskInstance,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn week_planner() -> Planner {
    Planner::new(PlanningRange::new(d(2025, 7, 22), d(2025, 7, 28)).unwrap())
}

#[test]
fn adding_assignments_regenerates_instances() {
    let mut planner = week_planner();
    let summary = planner
        .add_assignment(Assignment::split("1", "Workbook", "数1", 10))
        .unwrap();
    assert_eq!(summary.instance_count, 7);
    assert_eq!(summary.reconcile.created, 7);

    planner
        .add_assignment(Assignment::recurring("2", "Vocabulary", "EC1"))
        .unwrap();
    assert_eq!(planner.instances().len(), 14);
    assert_eq!(planner.tasks_on(d(2025, 7, 22)).len(), 2);
}

#[test]
fn done_flags_survive_unrelated_assignment_changes() {
    let mut planner = week_planner();
    planner
        .add_assignment(Assignment::split("1", "Workbook", "数1", 10))
        .unwrap();
    assert!(planner.toggle_done("1-0"));
    assert!(planner.toggle_done("1-3"));

    let summary = planner
        .add_assignment(Assignment::recurring("2", "Vocabulary", "EC1"))
        .unwrap();
    assert_eq!(summary.reconcile.carried_done, 2);
    assert!(planner.find_instance("1-0").unwrap().done);
    assert!(planner.find_instance("1-3").unwrap().done);
    assert_eq!(planner.progress().completed_tasks, 2);
}

#[test]
fn removing_an_assignment_drops_its_instances() {
    let mut planner = week_planner();
    planner
        .add_assignment(Assignment::split("1", "Workbook", "数1", 10))
        .unwrap();
    planner
        .add_assignment(Assignment::recurring("2", "Vocabulary", "EC1"))
        .unwrap();

    let summary = planner.remove_assignment("2").unwrap();
    assert_eq!(summary.reconcile.dropped, 7);
    assert!(
        planner
            .instances()
            .iter()
            .all(|t| t.source_assignment_id == "1")
    );
    assert!(planner.remove_assignment("2").is_none());
}

#[test]
fn removing_the_last_assignment_empties_the_schedule() {
    let mut planner = week_planner();
    planner
        .add_assignment(Assignment::recurring("1", "Reading", "国語"))
        .unwrap();
    planner.remove_assignment("1").unwrap();
    assert!(planner.instances().is_empty());
    assert_eq!(planner.progress().total_tasks, 0);
}

#[test]
fn add_assignment_rejects_invalid_input() {
    let mut planner = week_planner();
    assert_eq!(
        planner.add_assignment(Assignment::split("1", "Workbook", "数1", 0)),
        Err(AssignmentValidationError::NoUnits("1".into()))
    );
    assert_eq!(
        planner.add_assignment(Assignment::split("", "Workbook", "数1", 3)),
        Err(AssignmentValidationError::EmptyId)
    );
    assert_eq!(
        planner.add_assignment(Assignment::recurring("2", "  ", "数1")),
        Err(AssignmentValidationError::EmptyName("2".into()))
    );

    planner
        .add_assignment(Assignment::recurring("3", "Reading", "国語"))
        .unwrap();
    assert_eq!(
        planner.add_assignment(Assignment::recurring("3", "Reading again", "国語")),
        Err(AssignmentValidationError::DuplicateId("3".into()))
    );
    assert_eq!(planner.assignments().len(), 1);
}

#[test]
fn reschedule_is_permissive_and_reset_by_regeneration() {
    let mut planner = week_planner();
    planner
        .add_assignment(Assignment::split("1", "Workbook", "数1", 7))
        .unwrap();
    planner.toggle_done("1-1");

    assert!(planner.reschedule("1-1", d(2025, 12, 24)));
    let moved = planner.find_instance("1-1").unwrap();
    assert_eq!(moved.date, d(2025, 12, 24));
    assert!(moved.done);
    assert_eq!(planner.tasks_on(d(2025, 12, 24)).len(), 1);
    assert_eq!(
        planner.day_schedules().last().map(|day| day.date),
        Some(d(2025, 12, 24))
    );

    planner.regenerate();
    let regenerated = planner.find_instance("1-1").unwrap();
    assert_eq!(regenerated.date, d(2025, 7, 23));
    assert!(regenerated.done);
}

#[test]
fn mutators_report_unknown_ids() {
    let mut planner = week_planner();
    assert!(!planner.toggle_done("nope-0"));
    assert!(!planner.reschedule("nope-0", d(2025, 7, 23)));
}

#[test]
fn from_parts_reconciles_stored_instances() {
    let range = PlanningRange::new(d(2025, 7, 22), d(2025, 7, 24)).unwrap();
    let assignments = vec![Assignment::split("1", "Workbook", "数1", 3)];
    let mut seed = Planner::new(range);
    seed.replace_assignments(assignments.clone()).unwrap();
    seed.toggle_done("1-2");

    let mut stored: Vec<ScheduledTaskInstance> = seed.instances().to_vec();
    let mut orphan = stored[0].clone();
    orphan.id = "gone-0".into();
    orphan.source_assignment_id = "gone".into();
    stored.push(orphan);

    let restored = Planner::from_parts(range, assignments, stored).unwrap();
    assert_eq!(restored.instances().len(), 3);
    assert!(restored.find_instance("1-2").unwrap().done);
    assert!(restored.find_instance("gone-0").is_none());
}

#[test]
fn next_assignment_id_follows_numeric_maximum() {
    let mut planner = week_planner();
    assert_eq!(planner.next_assignment_id(), "1");
    planner
        .add_assignment(Assignment::recurring("41", "Reading", "国語"))
        .unwrap();
    planner
        .add_assignment(Assignment::recurring("custom", "Diary", "国語"))
        .unwrap();
    assert_eq!(planner.next_assignment_id(), "42");
}

#[test]
fn restore_completion_applies_snapshot_by_identity() {
    let mut planner = week_planner();
    planner
        .add_assignment(Assignment::recurring("1", "Reading", "国語"))
        .unwrap();
    planner.toggle_done("1-0");
    let mut snapshot = planner.instances().to_vec();
    snapshot[0].done = false;
    snapshot[4].done = true;

    let report = planner.restore_completion(&snapshot);
    assert_eq!(report.carried, 7);
    assert_eq!(report.carried_done, 1);
    assert!(!planner.find_instance("1-0").unwrap().done);
    assert!(planner.find_instance("1-4").unwrap().done);
}

#[test]
fn regenerate_summary_describes_changes() {
    let mut planner = week_planner();
    let summary = planner
        .add_assignment(Assignment::split("1", "Workbook", "数1", 3))
        .unwrap();
    assert_eq!(summary.to_cli_summary(), "assignments=1, tasks=3, new=3");
}

#[test]
fn assignment_describe_shows_units_or_daily() {
    assert_eq!(
        Assignment::split("1", "Workbook", "数1", 30).describe(),
        "数1 • 30ページ"
    );
    assert_eq!(
        Assignment::recurring("2", "Reading", "国語").describe(),
        "国語 • daily"
    );
}
