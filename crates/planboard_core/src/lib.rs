//! Core domain logic for Planboard.
//! Collections, calendar generation and their invariants live here; the CLI
//! only presents them.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::cursor::{days_in_month, MonthCursor};
pub use calendar::grid::{build_month_grid, CalendarCell, DayCell, MonthGrid, WEEKDAY_LABELS};
pub use config::PlannerConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::collection::{Collection, CollectionKey, TaskPeriod};
pub use model::record::{
    Entry, Note, RecordId, RecordValidationError, ScheduledTask, StudyFile, TaskRecord,
};
pub use repo::collection_repo::CollectionStore;
pub use repo::kv_repo::{KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore};
pub use service::calendar_service::{
    CalendarError, CalendarService, DaySelection, InputOutcome, ScheduledTaskDraft,
    ScheduledTaskInput,
};
pub use service::planner_service::{PlannerError, PlannerResult, PlannerService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
