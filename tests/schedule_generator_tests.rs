use chrono::NaiveDate;
use homework_planner::schedule::split_task_name;
use homework_planner::subject::{self, UNCATEGORIZED};
use homework_planner::{
    Assignment, ScheduledTaskInstance, TaskKind, days_between, distribute_units, flatten,
    generate, group_by_date, tasks_on,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn units_of(instance: &ScheduledTaskInstance, base_name: &str) -> u32 {
    instance
        .name
        .strip_prefix(base_name)
        .and_then(|rest| rest.trim().strip_suffix('p'))
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("unexpected split name {}", instance.name))
}

fn instances_for<'a>(
    instances: &'a [ScheduledTaskInstance],
    assignment_id: &str,
) -> Vec<&'a ScheduledTaskInstance> {
    instances
        .iter()
        .filter(|t| t.source_assignment_id == assignment_id)
        .collect()
}

#[test]
fn distribute_units_gives_remainder_to_earliest_days() {
    assert_eq!(distribute_units(10, 3), vec![4, 3, 3]);
    assert_eq!(distribute_units(2, 5), vec![1, 1, 0, 0, 0]);
    assert_eq!(distribute_units(9, 3), vec![3, 3, 3]);
    assert_eq!(distribute_units(0, 4), vec![0, 0, 0, 0]);
    assert!(distribute_units(7, 0).is_empty());
}

#[test]
fn schedule_has_one_entry_per_day_in_order() {
    let start = d(2025, 7, 22);
    let end = d(2025, 8, 31);
    let assignments = vec![Assignment::split("1", "Workbook", "数1", 100)];
    let schedule = generate(&assignments, start, end);

    assert_eq!(schedule.len() as i64, days_between(start, end));
    assert_eq!(schedule.first().map(|day| day.date), Some(start));
    assert_eq!(schedule.last().map(|day| day.date), Some(end));
    assert!(schedule.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn empty_assignment_list_yields_days_without_tasks() {
    let schedule = generate(&[], d(2025, 7, 22), d(2025, 7, 28));
    assert_eq!(schedule.len(), 7);
    assert!(schedule.iter().all(|day| day.tasks.is_empty()));
}

#[test]
fn recurring_assignment_appears_once_every_day() {
    let assignment = Assignment::recurring("7", "Vocabulary", "EC1").with_high_effort(true);
    let schedule = generate(&[assignment], d(2025, 7, 22), d(2025, 8, 31));

    for (index, day) in schedule.iter().enumerate() {
        let matching: Vec<_> = day
            .tasks
            .iter()
            .filter(|t| t.source_assignment_id == "7")
            .collect();
        assert_eq!(matching.len(), 1);
        let task = matching[0];
        assert_eq!(task.id, format!("7-{index}"));
        assert_eq!(task.name, "Vocabulary");
        assert_eq!(task.kind, TaskKind::Daily);
        assert!(task.high_effort);
        assert!(!task.done);
        assert_eq!(task.date, day.date);
        assert_eq!(task.color_tag, "#64b5f6");
    }
}

#[test]
fn recurring_assignment_ignores_total_units() {
    let mut assignment = Assignment::recurring("r", "Diary", "国語");
    assignment.total_units = 3;
    let instances = flatten(generate(&[assignment], d(2025, 7, 1), d(2025, 7, 10)));
    assert_eq!(instances.len(), 10);
    assert!(instances.iter().all(|t| t.name == "Diary"));
}

#[test]
fn split_ten_units_over_three_days() {
    let assignment = Assignment::split("t1", "Problems", "物理", 10);
    let schedule = generate(&[assignment], d(2025, 7, 22), d(2025, 7, 24));

    let names: Vec<Vec<&str>> = schedule
        .iter()
        .map(|day| day.tasks.iter().map(|t| t.name.as_str()).collect())
        .collect();
    assert_eq!(
        names,
        vec![vec!["Problems 4ページ"], vec!["Problems 3ページ"], vec!["Problems 3ページ"]]
    );
    assert_eq!(schedule[1].tasks[0].id, "t1-1");
    assert_eq!(schedule[1].tasks[0].kind, TaskKind::Split);
}

#[test]
fn split_fewer_units_than_days_leaves_later_days_empty() {
    let assignment = Assignment::split("t2", "Essay", "国語", 2);
    let schedule = generate(&[assignment], d(2025, 7, 22), d(2025, 7, 26));

    assert_eq!(schedule.len(), 5);
    assert_eq!(schedule[0].tasks.len(), 1);
    assert_eq!(schedule[0].tasks[0].name, "Essay 1ページ");
    assert_eq!(schedule[0].tasks[0].id, "t2-0");
    assert_eq!(schedule[1].tasks.len(), 1);
    assert_eq!(schedule[1].tasks[0].id, "t2-1");
    assert!(schedule[2..].iter().all(|day| day.tasks.is_empty()));
}

#[test]
fn split_units_sum_to_total_for_many_shapes() {
    for total in [1u32, 5, 40, 41, 42, 83, 250, 1000] {
        for (start, end) in [
            (d(2025, 7, 22), d(2025, 8, 31)),
            (d(2025, 1, 1), d(2025, 1, 1)),
            (d(2024, 12, 25), d(2025, 1, 7)),
        ] {
            let assignment = Assignment::split("s", "Drill", "数A", total);
            let instances = flatten(generate(&[assignment], start, end));
            let total_days = days_between(start, end) as usize;

            let sum: u32 = instances.iter().map(|t| units_of(t, "Drill")).sum();
            assert_eq!(sum, total, "total={total} days={total_days}");
            assert!(instances.len() <= total_days);
            assert!(instances.iter().all(|t| units_of(t, "Drill") > 0));
        }
    }
}

#[test]
fn zero_unit_split_produces_nothing() {
    let assignments = vec![
        Assignment::split("z", "Nothing", "化学", 0),
        Assignment::recurring("r", "Reading", "国語"),
    ];
    let instances = flatten(generate(&assignments, d(2025, 7, 22), d(2025, 7, 25)));
    assert!(instances_for(&instances, "z").is_empty());
    assert_eq!(instances_for(&instances, "r").len(), 4);
}

#[test]
fn inverted_range_yields_empty_schedule() {
    let assignments = vec![
        Assignment::split("a", "Workbook", "数1", 10),
        Assignment::recurring("b", "Reading", "国語"),
    ];
    let schedule = generate(&assignments, d(2025, 7, 22), d(2025, 7, 21));
    assert!(schedule.is_empty());
}

#[test]
fn unknown_category_falls_back_to_uncategorized_color() {
    let assignment = Assignment::split("u", "Art project", "Art", 3);
    let instances = flatten(generate(&[assignment], d(2025, 7, 22), d(2025, 7, 24)));
    assert_eq!(instances.len(), 3);
    assert!(
        instances
            .iter()
            .all(|t| t.color_tag == subject::color_for(UNCATEGORIZED))
    );
    assert!(instances.iter().all(|t| t.category == "Art"));
}

#[test]
fn generation_is_deterministic() {
    let assignments = vec![
        Assignment::split("1", "Workbook", "数1", 57),
        Assignment::recurring("2", "Vocabulary", "EC1"),
        Assignment::split("3", "Lab report", "生物", 4).with_high_effort(true),
    ];
    let first = generate(&assignments, d(2025, 7, 22), d(2025, 8, 31));
    let second = generate(&assignments, d(2025, 7, 22), d(2025, 8, 31));
    assert_eq!(first, second);
}

#[test]
fn day_tasks_keep_assignment_order() {
    let assignments = vec![
        Assignment::recurring("b", "Zeta", "国語"),
        Assignment::split("a", "Alpha", "数1", 41),
    ];
    let schedule = generate(&assignments, d(2025, 7, 22), d(2025, 8, 31));
    let first_day: Vec<&str> = schedule[0].tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(first_day, vec!["b-0", "a-0"]);
}

#[test]
fn split_name_embeds_units() {
    assert_eq!(split_task_name("Workbook", 12), "Workbook 12ページ");
}

#[test]
fn group_by_date_sorts_days_and_names() {
    let assignments = vec![
        Assignment::recurring("1", "Zeta", "国語"),
        Assignment::recurring("2", "Alpha", "数1"),
    ];
    let mut instances = flatten(generate(&assignments, d(2025, 7, 22), d(2025, 7, 23)));
    instances.reverse();
    // A task moved outside the range still gets its own day.
    instances[0].date = d(2025, 9, 1);

    let days = group_by_date(&instances);
    let dates: Vec<NaiveDate> = days.iter().map(|day| day.date).collect();
    assert_eq!(dates, vec![d(2025, 7, 22), d(2025, 7, 23), d(2025, 9, 1)]);

    let first: Vec<&str> = days[0].tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(first, vec!["Alpha", "Zeta"]);
    assert_eq!(days[2].tasks.len(), 1);
}

#[test]
fn tasks_on_filters_by_current_date() {
    let assignments = vec![Assignment::split("1", "Workbook", "数1", 5)];
    let instances = flatten(generate(&assignments, d(2025, 7, 22), d(2025, 7, 31)));
    let on_day = tasks_on(&instances, d(2025, 7, 24));
    assert_eq!(on_day.len(), 1);
    assert_eq!(on_day[0].id, "1-2");
    assert!(tasks_on(&instances, d(2025, 7, 30)).is_empty());
}
