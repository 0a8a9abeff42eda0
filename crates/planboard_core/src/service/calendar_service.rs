//! Calendar use cases: month rendering and day-click scheduling.
//!
//! # Responsibility
//! - Render a month grid with the current scheduled-task dates overlaid.
//! - Turn a day selection plus collected input into a scheduled task.
//!
//! # Invariants
//! - Every render re-reads the scheduled-task collection.
//! - A cancelled or blank submission writes nothing.

use crate::calendar::cursor::MonthCursor;
use crate::calendar::grid::{build_month_grid, MonthGrid};
use crate::model::collection::Collection;
use crate::model::record::{Entry, RecordValidationError, ScheduledTask};
use crate::repo::collection_repo::CollectionStore;
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use crate::service::planner_service::normalize_time;
use log::{debug, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What the user entered for a selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTaskDraft {
    pub text: String,
    pub time: Option<String>,
}

/// Result of asking the user for task details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The dialog was dismissed.
    Cancelled,
    Submitted(ScheduledTaskDraft),
}

/// Collects task details for a selected date.
///
/// Implemented by the presentation layer (terminal prompt, dialog, ...).
pub trait ScheduledTaskInput {
    fn collect(&mut self, date: &str) -> InputOutcome;
}

impl<F> ScheduledTaskInput for F
where
    F: FnMut(&str) -> InputOutcome,
{
    fn collect(&mut self, date: &str) -> InputOutcome {
        self(date)
    }
}

/// Outcome of selecting a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySelection {
    Cancelled,
    /// Submitted with blank text; nothing was stored.
    EmptyText,
    Created(Entry<ScheduledTask>),
}

#[derive(Debug)]
pub enum CalendarError {
    /// `day` does not exist in the displayed month.
    DayOutOfRange { cursor: MonthCursor, day: u32 },
    Validation(RecordValidationError),
    Repo(RepoError),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DayOutOfRange { cursor, day } => {
                write!(f, "day {day} is not part of {cursor}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DayOutOfRange { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for CalendarError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CalendarError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Calendar facade over the scheduled-task collection.
pub struct CalendarService<S: KeyValueStore> {
    store: CollectionStore<S>,
}

impl<S: KeyValueStore> CalendarService<S> {
    pub fn new(store: CollectionStore<S>) -> Self {
        Self { store }
    }

    /// Builds the grid for `cursor`, flagging days with scheduled tasks.
    pub fn render(&self, cursor: MonthCursor) -> RepoResult<MonthGrid> {
        let task_dates: HashSet<String> = self
            .store
            .load_all(Collection::scheduled_tasks())?
            .into_iter()
            .map(|entry| entry.item.date)
            .collect();
        let grid = build_month_grid(cursor, &task_dates);
        debug!(
            "event=calendar_render module=service status=ok month={cursor} weeks={}",
            grid.weeks.len()
        );
        Ok(grid)
    }

    /// Scheduled tasks on `date`, in insertion order.
    pub fn tasks_on(&self, date: &str) -> RepoResult<Vec<Entry<ScheduledTask>>> {
        let mut tasks = self.store.load_all(Collection::scheduled_tasks())?;
        tasks.retain(|entry| entry.item.date == date);
        Ok(tasks)
    }

    /// Handles a click on `day` of `cursor`.
    ///
    /// Asks `input` for task details; stores a task only for a non-blank
    /// submission.
    pub fn select_day(
        &self,
        cursor: MonthCursor,
        day: u32,
        input: &mut impl ScheduledTaskInput,
    ) -> Result<DaySelection, CalendarError> {
        let date = cursor
            .date_string(day)
            .ok_or(CalendarError::DayOutOfRange { cursor, day })?;

        let draft = match input.collect(&date) {
            InputOutcome::Cancelled => return Ok(DaySelection::Cancelled),
            InputOutcome::Submitted(draft) => draft,
        };
        let text = draft.text.trim();
        if text.is_empty() {
            return Ok(DaySelection::EmptyText);
        }

        let time = normalize_time(draft.time.as_deref())?;
        let task = ScheduledTask::new(text, date, time);
        task.validate()?;
        let entry = self.store.append(Collection::scheduled_tasks(), task)?;
        info!(
            "event=calendar_day_select module=service status=ok date={} has_time={}",
            entry.item.date,
            time.is_some()
        );
        Ok(DaySelection::Created(entry))
    }
}
