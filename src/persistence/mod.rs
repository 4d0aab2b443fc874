use crate::assignment::Assignment;
use crate::assignment_validation::validate_assignment;
use crate::calendar::PlanningRange;
use crate::instance::ScheduledTaskInstance;
use crate::planner::Planner;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::io;
use thiserror::Error;

/// Slot holding the assignment list.
pub const ASSIGNMENTS_SLOT: &str = "assignments";
/// Slot holding the scheduled instance list.
pub const INSTANCES_SLOT: &str = "scheduled-tasks";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Named key-value slots holding JSON text.
pub trait SlotStore {
    fn read_slot(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn write_slot(&self, key: &str, json: &str) -> PersistenceResult<()>;
}

pub fn load_slot<T, S>(store: &S, key: &str) -> PersistenceResult<Option<T>>
where
    T: DeserializeOwned,
    S: SlotStore + ?Sized,
{
    match store.read_slot(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Reads a slot, falling back to `T::default()` when it is missing,
/// unreadable, or malformed.
pub fn load_slot_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: SlotStore + ?Sized,
{
    match load_slot(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(key, error = %err, "stored slot unreadable; using default");
            T::default()
        }
    }
}

pub fn save_slot<T, S>(store: &S, key: &str, value: &T) -> PersistenceResult<()>
where
    T: Serialize + ?Sized,
    S: SlotStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.write_slot(key, &json)
}

/// Keeps the first valid record per id and logs the rest.
fn sanitize_assignments(assignments: Vec<Assignment>) -> Vec<Assignment> {
    let mut seen = HashSet::with_capacity(assignments.len());
    assignments
        .into_iter()
        .filter(|assignment| {
            if let Err(err) = validate_assignment(assignment) {
                tracing::warn!(error = %err, "dropping stored assignment");
                return false;
            }
            if !seen.insert(assignment.id.clone()) {
                tracing::warn!(id = %assignment.id, "dropping duplicate stored assignment");
                return false;
            }
            true
        })
        .collect()
}

/// Restores a planner from both slots and regenerates its schedule.
pub fn load_planner<S>(store: &S, range: PlanningRange) -> Planner
where
    S: SlotStore + ?Sized,
{
    let assignments: Vec<Assignment> = load_slot_or_default(store, ASSIGNMENTS_SLOT);
    let instances: Vec<ScheduledTaskInstance> = load_slot_or_default(store, INSTANCES_SLOT);
    let assignments = sanitize_assignments(assignments);
    tracing::info!(
        assignments = assignments.len(),
        instances = instances.len(),
        "planner state loaded"
    );
    match Planner::from_parts(range, assignments, instances) {
        Ok(planner) => planner,
        Err(err) => {
            tracing::warn!(error = %err, "stored assignments rejected; starting empty");
            Planner::new(range)
        }
    }
}

pub fn save_planner<S>(store: &S, planner: &Planner) -> PersistenceResult<()>
where
    S: SlotStore + ?Sized,
{
    save_slot(store, ASSIGNMENTS_SLOT, planner.assignments())?;
    save_slot(store, INSTANCES_SLOT, planner.instances())?;
    tracing::info!(
        assignments = planner.assignments().len(),
        instances = planner.instances().len(),
        "planner state saved"
    );
    Ok(())
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{JsonFileStore, load_instances_from_csv, save_instances_to_csv};
