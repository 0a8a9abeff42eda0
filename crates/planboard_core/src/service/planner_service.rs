//! Task, note, study-file and scheduled-task use cases.
//!
//! # Responsibility
//! - Normalize and validate user input, then append it to its collection.
//! - Remove records by stable id or by listed position.
//!
//! # Invariants
//! - Blank text never reaches storage.
//! - Scheduled tasks are stored only with a valid date and an empty or
//!   `HH:MM` time.
//! - Logged events carry collection keys and counts, never record content.

use crate::model::collection::{Collection, TaskPeriod};
use crate::model::record::{
    is_valid_time, Entry, Note, RecordId, RecordValidationError, ScheduledTask, StudyFile,
    TaskRecord,
};
use crate::repo::collection_repo::CollectionStore;
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Failure of a planner use case.
#[derive(Debug)]
pub enum PlannerError {
    /// Input was rejected before anything was written.
    Validation(RecordValidationError),
    Repo(RepoError),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for PlannerError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for PlannerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case facade over the planner collections.
pub struct PlannerService<S: KeyValueStore> {
    store: CollectionStore<S>,
}

impl<S: KeyValueStore> PlannerService<S> {
    pub fn new(store: CollectionStore<S>) -> Self {
        Self { store }
    }

    /// Adds a task to the `period` list.
    ///
    /// A non-blank `time` is folded into the text as ` (Time: HH:MM)`.
    pub fn add_task(
        &self,
        period: TaskPeriod,
        text: &str,
        time: Option<&str>,
    ) -> PlannerResult<Entry<TaskRecord>> {
        let text = require_text(text)?;
        let time = normalize_time(time)?;
        let record = TaskRecord::with_time(text, time);
        let entry = self.store.append(Collection::tasks(period), record)?;
        info!(
            "event=task_add module=service status=ok key={} has_time={}",
            period.collection_key(),
            time.is_some()
        );
        Ok(entry)
    }

    pub fn list_tasks(&self, period: TaskPeriod) -> RepoResult<Vec<Entry<TaskRecord>>> {
        self.store.load_all(Collection::tasks(period))
    }

    /// Completes (removes) a task. Returns `None` for an unknown id.
    pub fn complete_task(
        &self,
        period: TaskPeriod,
        id: RecordId,
    ) -> RepoResult<Option<Entry<TaskRecord>>> {
        self.store.remove_by_id(Collection::tasks(period), id)
    }

    /// Completes the task at a listed position. Returns `None` when out of range.
    pub fn complete_task_at(
        &self,
        period: TaskPeriod,
        index: usize,
    ) -> RepoResult<Option<Entry<TaskRecord>>> {
        self.store.remove_at(Collection::tasks(period), index)
    }

    pub fn add_note(&self, text: &str) -> PlannerResult<Entry<Note>> {
        let text = require_text(text)?;
        let entry = self.store.append(Collection::notes(), text.to_string())?;
        info!("event=note_add module=service status=ok");
        Ok(entry)
    }

    pub fn list_notes(&self) -> RepoResult<Vec<Entry<Note>>> {
        self.store.load_all(Collection::notes())
    }

    pub fn delete_note(&self, id: RecordId) -> RepoResult<Option<Entry<Note>>> {
        self.store.remove_by_id(Collection::notes(), id)
    }

    pub fn delete_note_at(&self, index: usize) -> RepoResult<Option<Entry<Note>>> {
        self.store.remove_at(Collection::notes(), index)
    }

    pub fn add_study_file(&self, name: &str, url: &str) -> PlannerResult<Entry<StudyFile>> {
        let mut added = self.add_study_files(vec![StudyFile {
            name: name.trim().to_string(),
            url: url.to_string(),
        }])?;
        Ok(added.remove(0))
    }

    /// Adds several files in one write.
    ///
    /// The whole batch is rejected when any file fails validation.
    pub fn add_study_files(&self, files: Vec<StudyFile>) -> PlannerResult<Vec<Entry<StudyFile>>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        for file in &files {
            file.validate()?;
        }
        let count = files.len();
        let entries = self.store.append_many(Collection::study_files(), files)?;
        info!("event=study_file_add module=service status=ok count={count}");
        Ok(entries)
    }

    pub fn list_study_files(&self) -> RepoResult<Vec<Entry<StudyFile>>> {
        self.store.load_all(Collection::study_files())
    }

    pub fn delete_study_file(&self, id: RecordId) -> RepoResult<Option<Entry<StudyFile>>> {
        self.store.remove_by_id(Collection::study_files(), id)
    }

    pub fn delete_study_file_at(&self, index: usize) -> RepoResult<Option<Entry<StudyFile>>> {
        self.store.remove_at(Collection::study_files(), index)
    }

    /// Schedules a task on `date` (`YYYY-MM-DD`) with an optional time.
    pub fn schedule_task(
        &self,
        text: &str,
        date: &str,
        time: Option<&str>,
    ) -> PlannerResult<Entry<ScheduledTask>> {
        let text = require_text(text)?;
        let time = normalize_time(time)?;
        let task = ScheduledTask::new(text, date.trim(), time);
        task.validate()?;
        let entry = self.store.append(Collection::scheduled_tasks(), task)?;
        info!(
            "event=scheduled_task_add module=service status=ok date={} has_time={}",
            entry.item.date,
            time.is_some()
        );
        Ok(entry)
    }

    pub fn list_scheduled_tasks(&self) -> RepoResult<Vec<Entry<ScheduledTask>>> {
        self.store.load_all(Collection::scheduled_tasks())
    }

    pub fn complete_scheduled_task(
        &self,
        id: RecordId,
    ) -> RepoResult<Option<Entry<ScheduledTask>>> {
        self.store.remove_by_id(Collection::scheduled_tasks(), id)
    }

    pub fn complete_scheduled_task_at(
        &self,
        index: usize,
    ) -> RepoResult<Option<Entry<ScheduledTask>>> {
        self.store.remove_at(Collection::scheduled_tasks(), index)
    }
}

fn require_text(text: &str) -> Result<&str, RecordValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::EmptyText);
    }
    Ok(trimmed)
}

/// Blank means "no time"; anything else must be `HH:MM`.
pub(crate) fn normalize_time(time: Option<&str>) -> Result<Option<&str>, RecordValidationError> {
    match time.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) if is_valid_time(value) => Ok(Some(value)),
        Some(value) => Err(RecordValidationError::InvalidTime(value.to_string())),
        None => Ok(None),
    }
}
