//! Collection naming and typed collection handles.

use crate::model::record::{Note, ScheduledTask, StudyFile, TaskRecord};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::str::FromStr;

/// Name of one independently persisted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionKey {
    #[serde(rename = "dailyTasks")]
    DailyTasks,
    #[serde(rename = "weeklyTasks")]
    WeeklyTasks,
    #[serde(rename = "monthlyTasks")]
    MonthlyTasks,
    #[serde(rename = "notes")]
    Notes,
    #[serde(rename = "studyFiles")]
    StudyFiles,
    #[serde(rename = "scheduledTasks")]
    ScheduledTasks,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 6] = [
        Self::DailyTasks,
        Self::WeeklyTasks,
        Self::MonthlyTasks,
        Self::Notes,
        Self::StudyFiles,
        Self::ScheduledTasks,
    ];

    /// Storage key used by the key-value backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DailyTasks => "dailyTasks",
            Self::WeeklyTasks => "weeklyTasks",
            Self::MonthlyTasks => "monthlyTasks",
            Self::Notes => "notes",
            Self::StudyFiles => "studyFiles",
            Self::ScheduledTasks => "scheduledTasks",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

impl Display for CollectionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizon of an undated task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TaskPeriod {
    pub const ALL: [TaskPeriod; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn collection_key(self) -> CollectionKey {
        match self {
            Self::Daily => CollectionKey::DailyTasks,
            Self::Weekly => CollectionKey::WeeklyTasks,
            Self::Monthly => CollectionKey::MonthlyTasks,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for TaskPeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!(
                "unknown task period `{other}`; expected daily|weekly|monthly"
            )),
        }
    }
}

/// A collection key bound to the record type stored under it.
///
/// Handles are only constructible through the named constructors, so a key
/// can never be read back with the wrong record shape.
#[derive(Debug)]
pub struct Collection<T> {
    key: CollectionKey,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T> Collection<T> {
    const fn bind(key: CollectionKey) -> Self {
        Self {
            key,
            _record: PhantomData,
        }
    }

    pub fn key(&self) -> CollectionKey {
        self.key
    }
}

impl Collection<TaskRecord> {
    pub const fn tasks(period: TaskPeriod) -> Self {
        match period {
            TaskPeriod::Daily => Self::bind(CollectionKey::DailyTasks),
            TaskPeriod::Weekly => Self::bind(CollectionKey::WeeklyTasks),
            TaskPeriod::Monthly => Self::bind(CollectionKey::MonthlyTasks),
        }
    }
}

impl Collection<Note> {
    pub const fn notes() -> Self {
        Self::bind(CollectionKey::Notes)
    }
}

impl Collection<StudyFile> {
    pub const fn study_files() -> Self {
        Self::bind(CollectionKey::StudyFiles)
    }
}

impl Collection<ScheduledTask> {
    pub const fn scheduled_tasks() -> Self {
        Self::bind(CollectionKey::ScheduledTasks)
    }
}
