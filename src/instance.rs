use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Daily,
    Split,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Daily => "daily",
            TaskKind::Split => "split",
        }
    }

}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task kind '{0}'")]
pub struct ParseTaskKindError(pub String);

impl FromStr for TaskKind {
    type Err = ParseTaskKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "daily" => Ok(TaskKind::Daily),
            "split" => Ok(TaskKind::Split),
            other => Err(ParseTaskKindError(other.to_string())),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's occurrence of an assignment.
///
/// Every field except `done` is derived from the source assignment and the
/// slot index; `done` is user state and is what reconciliation preserves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTaskInstance {
    pub id: String,
    pub name: String,
    #[serde(alias = "subject")]
    pub category: String,
    #[serde(alias = "type")]
    pub kind: TaskKind,
    #[serde(alias = "hard", default)]
    pub high_effort: bool,
    #[serde(alias = "color")]
    pub color_tag: String,
    pub date: NaiveDate,
    #[serde(alias = "originalTaskId")]
    pub source_assignment_id: String,
    #[serde(default)]
    pub done: bool,
}

/// Identity of the instance occupying `slot` for `assignment_id`.
pub fn instance_id(assignment_id: &str, slot: usize) -> String {
    format!("{assignment_id}-{slot}")
}

/// A date and the instances scheduled on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub tasks: Vec<ScheduledTaskInstance>,
}

impl DaySchedule {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: Vec::new(),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.done).count()
    }
}

/// Copy of `instances` with `done` flipped on the instance whose id is `id`.
pub fn toggle_done(instances: &[ScheduledTaskInstance], id: &str) -> Vec<ScheduledTaskInstance> {
    instances
        .iter()
        .map(|instance| {
            if instance.id == id {
                ScheduledTaskInstance {
                    done: !instance.done,
                    ..instance.clone()
                }
            } else {
                instance.clone()
            }
        })
        .collect()
}

/// Copy of `instances` with the instance whose id is `id` moved to `new_date`.
///
/// Any date is accepted, including dates outside the planning range.
pub fn reschedule(
    instances: &[ScheduledTaskInstance],
    id: &str,
    new_date: NaiveDate,
) -> Vec<ScheduledTaskInstance> {
    instances
        .iter()
        .map(|instance| {
            if instance.id == id {
                ScheduledTaskInstance {
                    date: new_date,
                    ..instance.clone()
                }
            } else {
                instance.clone()
            }
        })
        .collect()
}
