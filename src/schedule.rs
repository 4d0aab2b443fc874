use crate::assignment::Assignment;
use crate::calendar::{days_between, enumerate_dates};
use crate::instance::{DaySchedule, ScheduledTaskInstance, TaskKind, instance_id};
use crate::subject;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-day unit counts for splitting `total_units` across `total_days` days.
///
/// The first `total_units % total_days` days carry one extra unit.
pub fn distribute_units(total_units: u32, total_days: usize) -> Vec<u32> {
    if total_days == 0 {
        return Vec::new();
    }
    let days = total_days as u64;
    let base = u64::from(total_units) / days;
    let remainder = u64::from(total_units) % days;
    (0..days)
        .map(|day| (base + u64::from(day < remainder)) as u32)
        .collect()
}

/// Display name of a split instance carrying `units` units.
pub fn split_task_name(name: &str, units: u32) -> String {
    format!("{name} {units}ページ")
}

/// Lays `assignments` out over `range_start..=range_end`.
///
/// Returns one [`DaySchedule`] per date in order. A range whose end precedes
/// its start yields an empty schedule.
pub fn generate(
    assignments: &[Assignment],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<DaySchedule> {
    let total_days = days_between(range_start, range_end);
    if total_days <= 0 {
        if total_days < 0 {
            tracing::warn!(%range_start, %range_end, "schedule range is inverted; nothing generated");
        }
        return Vec::new();
    }

    let mut schedule: Vec<DaySchedule> = enumerate_dates(range_start, total_days as usize)
        .into_iter()
        .map(DaySchedule::new)
        .collect();

    for assignment in assignments {
        if assignment.recurring {
            place_recurring(assignment, &mut schedule);
        } else {
            place_split(assignment, &mut schedule);
        }
    }

    schedule
}

fn instance_for(
    assignment: &Assignment,
    slot: usize,
    name: String,
    kind: TaskKind,
    date: NaiveDate,
) -> ScheduledTaskInstance {
    ScheduledTaskInstance {
        id: instance_id(&assignment.id, slot),
        name,
        category: assignment.category.clone(),
        kind,
        high_effort: assignment.high_effort,
        color_tag: subject::color_for(&assignment.category).to_string(),
        date,
        source_assignment_id: assignment.id.clone(),
        done: false,
    }
}

fn place_recurring(assignment: &Assignment, schedule: &mut [DaySchedule]) {
    for (slot, day) in schedule.iter_mut().enumerate() {
        let instance = instance_for(
            assignment,
            slot,
            assignment.name.clone(),
            TaskKind::Daily,
            day.date,
        );
        day.tasks.push(instance);
    }
}

fn place_split(assignment: &Assignment, schedule: &mut [DaySchedule]) {
    let plan = distribute_units(assignment.total_units, schedule.len());
    let mut assigned: u32 = 0;

    for (slot, (day, units)) in schedule.iter_mut().zip(plan).enumerate() {
        if assigned >= assignment.total_units {
            break;
        }
        if units == 0 {
            continue;
        }
        let instance = instance_for(
            assignment,
            slot,
            split_task_name(&assignment.name, units),
            TaskKind::Split,
            day.date,
        );
        day.tasks.push(instance);
        assigned += units;
    }
}

/// All instances of `schedule` in day order.
pub fn flatten(schedule: Vec<DaySchedule>) -> Vec<ScheduledTaskInstance> {
    schedule.into_iter().flat_map(|day| day.tasks).collect()
}

/// Groups stored instances by their current date.
///
/// Only dates that carry at least one instance appear, so rescheduled
/// instances outside the planning range still show up. Days are in date
/// order and tasks within a day are ordered by name.
pub fn group_by_date(instances: &[ScheduledTaskInstance]) -> Vec<DaySchedule> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ScheduledTaskInstance>> = BTreeMap::new();
    for instance in instances {
        by_date
            .entry(instance.date)
            .or_default()
            .push(instance.clone());
    }

    by_date
        .into_iter()
        .map(|(date, mut tasks)| {
            tasks.sort_by(|a, b| a.name.cmp(&b.name));
            DaySchedule { date, tasks }
        })
        .collect()
}

/// Instances currently scheduled on `date`, in stored order.
pub fn tasks_on(instances: &[ScheduledTaskInstance], date: NaiveDate) -> Vec<&ScheduledTaskInstance> {
    instances
        .iter()
        .filter(|instance| instance.date == date)
        .collect()
}
