pub mod assignment;
pub(crate) mod assignment_validation;
pub mod calendar;
pub mod config;
pub mod frame;
pub mod instance;
pub mod persistence;
pub mod planner;
pub mod progress;
pub mod reconcile;
pub mod schedule;
pub mod subject;

pub use assignment::Assignment;
pub use assignment_validation::{
    AssignmentValidationError, validate_assignment, validate_assignment_collection,
};
pub use calendar::{PlanningRange, RangeError, days_between, enumerate_dates};
pub use config::{ConfigError, PlannerConfig, StoreBackend, StoreConfig};
pub use instance::{
    DaySchedule, ParseTaskKindError, ScheduledTaskInstance, TaskKind, reschedule, toggle_done,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteSlotStore;
pub use persistence::{
    JsonFileStore, PersistenceError, SlotStore, load_instances_from_csv, load_planner,
    save_instances_to_csv, save_planner,
};
pub use planner::{Planner, RegenerateSummary};
pub use progress::{CategoryProgress, ProgressSummary, aggregate};
pub use reconcile::{ReconcileReport, reconcile, reconcile_with_report, restore_stored};
pub use schedule::{distribute_units, flatten, generate, group_by_date, tasks_on};
