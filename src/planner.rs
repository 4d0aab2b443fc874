use crate::assignment::Assignment;
use crate::assignment_validation::{
    AssignmentValidationError, validate_assignment, validate_assignment_collection,
};
use crate::calendar::PlanningRange;
use crate::instance::{self, DaySchedule, ScheduledTaskInstance};
use crate::progress::{self, ProgressSummary};
use crate::reconcile::{ReconcileReport, reconcile_with_report, restore_stored};
use crate::schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of one derive-then-merge pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerateSummary {
    pub assignment_count: usize,
    pub instance_count: usize,
    pub reconcile: ReconcileReport,
}

impl RegenerateSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("assignments={}", self.assignment_count));
        parts.push(format!("tasks={}", self.instance_count));
        if self.reconcile.carried_done > 0 {
            parts.push(format!("kept_done={}", self.reconcile.carried_done));
        }
        if self.reconcile.created > 0 {
            parts.push(format!("new={}", self.reconcile.created));
        }
        if self.reconcile.dropped > 0 {
            parts.push(format!("dropped={}", self.reconcile.dropped));
        }
        parts.join(", ")
    }
}

/// Assignment list plus the instance list derived from it.
///
/// Assignments are the source of truth. Instances are regenerated after
/// every assignment change and otherwise only touched through
/// [`Planner::toggle_done`] and [`Planner::reschedule`].
#[derive(Debug, Clone)]
pub struct Planner {
    range: PlanningRange,
    assignments: Vec<Assignment>,
    instances: Vec<ScheduledTaskInstance>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlanningRange::default())
    }
}

impl Planner {
    pub fn new(range: PlanningRange) -> Self {
        Self {
            range,
            assignments: Vec::new(),
            instances: Vec::new(),
        }
    }

    /// Rebuilds a planner from stored state.
    ///
    /// The instance list is brought in line with the assignments, but stored
    /// `done` flags and moved dates are kept for every instance that still
    /// exists.
    pub fn from_parts(
        range: PlanningRange,
        assignments: Vec<Assignment>,
        stored: Vec<ScheduledTaskInstance>,
    ) -> Result<Self, AssignmentValidationError> {
        validate_assignment_collection(&assignments)?;
        let fresh = schedule::flatten(schedule::generate(&assignments, range.start(), range.end()));
        let (instances, report) = restore_stored(fresh, &stored);
        tracing::debug!(
            carried = report.carried,
            created = report.created,
            dropped = report.dropped,
            "stored instances restored"
        );
        Ok(Self {
            range,
            assignments,
            instances,
        })
    }

    pub fn range(&self) -> PlanningRange {
        self.range
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn instances(&self) -> &[ScheduledTaskInstance] {
        &self.instances
    }

    pub fn find_assignment(&self, id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|assignment| assignment.id == id)
    }

    pub fn find_instance(&self, id: &str) -> Option<&ScheduledTaskInstance> {
        self.instances.iter().find(|instance| instance.id == id)
    }

    /// Smallest numeric id above every numeric assignment id in use.
    pub fn next_assignment_id(&self) -> String {
        self.assignments
            .iter()
            .filter_map(|assignment| assignment.id.parse::<u64>().ok())
            .max()
            .map(|max| max + 1)
            .unwrap_or(1)
            .to_string()
    }

    pub fn add_assignment(
        &mut self,
        assignment: Assignment,
    ) -> Result<RegenerateSummary, AssignmentValidationError> {
        validate_assignment(&assignment)?;
        if self.find_assignment(&assignment.id).is_some() {
            return Err(AssignmentValidationError::DuplicateId(assignment.id));
        }
        tracing::info!(id = %assignment.id, name = %assignment.name, "assignment added");
        self.assignments.push(assignment);
        Ok(self.regenerate())
    }

    /// Removes the assignment; its instances disappear with the regeneration.
    pub fn remove_assignment(&mut self, id: &str) -> Option<RegenerateSummary> {
        let before = self.assignments.len();
        self.assignments.retain(|assignment| assignment.id != id);
        if self.assignments.len() == before {
            return None;
        }
        tracing::info!(id, "assignment removed");
        Some(self.regenerate())
    }

    pub fn replace_assignments(
        &mut self,
        assignments: Vec<Assignment>,
    ) -> Result<RegenerateSummary, AssignmentValidationError> {
        validate_assignment_collection(&assignments)?;
        self.assignments = assignments;
        Ok(self.regenerate())
    }

    /// Generates a fresh schedule and merges it with the current instances.
    pub fn regenerate(&mut self) -> RegenerateSummary {
        let fresh = schedule::flatten(schedule::generate(
            &self.assignments,
            self.range.start(),
            self.range.end(),
        ));
        let (merged, report) = reconcile_with_report(fresh, &self.instances);
        self.instances = merged;

        let summary = RegenerateSummary {
            assignment_count: self.assignments.len(),
            instance_count: self.instances.len(),
            reconcile: report,
        };
        tracing::debug!(summary = %summary.to_cli_summary(), "schedule regenerated");
        summary
    }

    /// Takes completion state from `snapshot` (for example a CSV export)
    /// for every current instance, by identity. Instances missing from the
    /// snapshot become not done.
    pub fn restore_completion(&mut self, snapshot: &[ScheduledTaskInstance]) -> ReconcileReport {
        let current = std::mem::take(&mut self.instances);
        let (merged, report) = reconcile_with_report(current, snapshot);
        self.instances = merged;
        report
    }

    /// Flips `done` on the instance; false when no instance has that id.
    pub fn toggle_done(&mut self, id: &str) -> bool {
        if self.find_instance(id).is_none() {
            return false;
        }
        self.instances = instance::toggle_done(&self.instances, id);
        true
    }

    /// Moves the instance to `date`; false when no instance has that id.
    pub fn reschedule(&mut self, id: &str, date: NaiveDate) -> bool {
        if self.find_instance(id).is_none() {
            return false;
        }
        if !self.range.contains(date) {
            tracing::debug!(id, %date, "instance moved outside the planning range");
        }
        self.instances = instance::reschedule(&self.instances, id, date);
        true
    }

    pub fn progress(&self) -> ProgressSummary {
        progress::aggregate(&self.instances)
    }

    pub fn day_schedules(&self) -> Vec<DaySchedule> {
        schedule::group_by_date(&self.instances)
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&ScheduledTaskInstance> {
        schedule::tasks_on(&self.instances, date)
    }
}
