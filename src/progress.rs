use crate::instance::ScheduledTaskInstance;
use crate::subject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub total: usize,
    pub completed: usize,
}

impl CategoryProgress {
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.completed, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub percentage: u32,
    pub subject_progress: BTreeMap<String, CategoryProgress>,
}

impl ProgressSummary {
    /// Per-subject progress in subject-table order.
    pub fn by_subject(&self) -> Vec<(&'static str, CategoryProgress)> {
        subject::subjects()
            .map(|label| {
                let progress = self.subject_progress.get(label).copied().unwrap_or_default();
                (label, progress)
            })
            .collect()
    }

    pub fn to_cli_summary(&self) -> String {
        format!(
            "{}/{} done ({}%)",
            self.completed_tasks, self.total_tasks, self.percentage
        )
    }
}

fn rounded_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 * 100.0 / total as f64).round() as u32
}

/// Totals and per-subject completion over `instances`.
///
/// Every subject in the table is present, zero-filled when unused. Instances
/// whose category is not in the table count toward the totals only.
pub fn aggregate(instances: &[ScheduledTaskInstance]) -> ProgressSummary {
    let total_tasks = instances.len();
    let completed_tasks = instances.iter().filter(|task| task.done).count();

    let mut subject_progress: BTreeMap<String, CategoryProgress> = subject::subjects()
        .map(|label| (label.to_string(), CategoryProgress::default()))
        .collect();

    for task in instances {
        if let Some(entry) = subject_progress.get_mut(&task.category) {
            entry.total += 1;
            if task.done {
                entry.completed += 1;
            }
        }
    }

    ProgressSummary {
        total_tasks,
        completed_tasks,
        percentage: rounded_percentage(completed_tasks, total_tasks),
        subject_progress,
    }
}
