use crate::instance::ScheduledTaskInstance;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Counts describing one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Fresh instances that matched a prior instance.
    pub carried: usize,
    /// Matched instances whose prior `done` was true.
    pub carried_done: usize,
    /// Fresh instances with no prior counterpart.
    pub created: usize,
    /// Prior instances with no fresh counterpart.
    pub dropped: usize,
}

/// Merges a freshly generated instance list with the previously stored one.
///
/// The result holds exactly the identities of `fresh`, in `fresh` order.
/// Only `done` is taken from a matching prior instance; every other field
/// keeps its freshly generated value.
pub fn reconcile(
    fresh: Vec<ScheduledTaskInstance>,
    prior: &[ScheduledTaskInstance],
) -> Vec<ScheduledTaskInstance> {
    reconcile_with_report(fresh, prior).0
}

pub fn reconcile_with_report(
    fresh: Vec<ScheduledTaskInstance>,
    prior: &[ScheduledTaskInstance],
) -> (Vec<ScheduledTaskInstance>, ReconcileReport) {
    merge(fresh, prior, false)
}

/// Merges a freshly generated list with instances read back from storage.
///
/// When the stored identities are exactly the fresh ones the stored list is
/// returned as is. Otherwise matched instances keep both their stored `done`
/// and their stored `date`, so moves made before saving survive a reload.
pub fn restore_stored(
    fresh: Vec<ScheduledTaskInstance>,
    stored: &[ScheduledTaskInstance],
) -> (Vec<ScheduledTaskInstance>, ReconcileReport) {
    let fresh_ids: HashSet<&str> = fresh.iter().map(|instance| instance.id.as_str()).collect();
    let stored_ids: HashSet<&str> = stored.iter().map(|instance| instance.id.as_str()).collect();
    if fresh.len() == stored.len() && fresh_ids == stored_ids {
        let report = ReconcileReport {
            carried: stored.len(),
            carried_done: stored.iter().filter(|instance| instance.done).count(),
            ..ReconcileReport::default()
        };
        return (stored.to_vec(), report);
    }
    merge(fresh, stored, true)
}

fn merge(
    fresh: Vec<ScheduledTaskInstance>,
    prior: &[ScheduledTaskInstance],
    keep_dates: bool,
) -> (Vec<ScheduledTaskInstance>, ReconcileReport) {
    let prior_by_id: HashMap<&str, &ScheduledTaskInstance> = prior
        .iter()
        .map(|instance| (instance.id.as_str(), instance))
        .collect();

    let mut report = ReconcileReport::default();
    let merged: Vec<ScheduledTaskInstance> = fresh
        .into_iter()
        .map(|mut instance| {
            match prior_by_id.get(instance.id.as_str()) {
                Some(previous) => {
                    report.carried += 1;
                    if previous.done {
                        report.carried_done += 1;
                    }
                    instance.done = previous.done;
                    if keep_dates {
                        instance.date = previous.date;
                    }
                }
                None => {
                    report.created += 1;
                    instance.done = false;
                }
            }
            instance
        })
        .collect();

    report.dropped = prior_by_id.len().saturating_sub(report.carried);
    (merged, report)
}
