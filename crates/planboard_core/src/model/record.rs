//! Record shapes stored in planner collections.
//!
//! # Responsibility
//! - Define task, note, study-file and scheduled-task records.
//! - Wrap records in `Entry` so deletion targets a stable id, not a position.
//! - Validate user-supplied fields before they reach storage.
//!
//! # Invariants
//! - `Entry::id` is assigned once on append and never reused.
//! - `ScheduledTask::date` is `YYYY-MM-DD`; `time` is empty or `HH:MM`.
//! - `StudyFile::url` is a self-contained `data:` URI.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Date format shared by scheduled tasks and calendar cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));
static DATA_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:[^,]*,").expect("valid data url regex"));

/// Stable identifier of one stored record.
pub type RecordId = Uuid;

/// A free-form note is just its text.
pub type Note = String;

/// One item of the daily, weekly or monthly task list.
///
/// Reads both `{"text": ...}` and a bare string, which older task lists
/// stored; always writes the object form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskRecordRepr")]
pub struct TaskRecord {
    /// Display text, optionally ending with a ` (Time: HH:MM)` suffix.
    pub text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskRecordRepr {
    Text(String),
    Record { text: String },
}

impl From<TaskRecordRepr> for TaskRecord {
    fn from(repr: TaskRecordRepr) -> Self {
        match repr {
            TaskRecordRepr::Text(text) | TaskRecordRepr::Record { text } => Self { text },
        }
    }
}

impl TaskRecord {
    /// Builds a task, folding an optional time into the display text.
    pub fn with_time(text: &str, time: Option<&str>) -> Self {
        let text = text.trim();
        match time.map(str::trim).filter(|value| !value.is_empty()) {
            Some(time) => Self {
                text: format!("{text} (Time: {time})"),
            },
            None => Self {
                text: text.to_string(),
            },
        }
    }
}

/// Uploaded study material embedded as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyFile {
    pub name: String,
    pub url: String,
}

impl StudyFile {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        if !DATA_URL_RE.is_match(&self.url) {
            return Err(RecordValidationError::InvalidDataUrl);
        }
        Ok(())
    }
}

/// Task bound to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub text: String,
    /// `YYYY-MM-DD`; matched against calendar cells by string equality.
    #[serde(default)]
    pub date: String,
    /// Empty when no time was given.
    #[serde(default)]
    pub time: String,
}

impl ScheduledTask {
    pub fn new(text: impl Into<String>, date: impl Into<String>, time: Option<&str>) -> Self {
        Self {
            text: text.into(),
            date: date.into(),
            time: time.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    /// Checks text, date and time before the task is stored.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.text.trim().is_empty() {
            return Err(RecordValidationError::EmptyText);
        }
        if NaiveDate::parse_from_str(&self.date, DATE_FORMAT).is_err() || self.date.len() != 10 {
            return Err(RecordValidationError::InvalidDate(self.date.clone()));
        }
        if !self.time.is_empty() && !TIME_RE.is_match(&self.time) {
            return Err(RecordValidationError::InvalidTime(self.time.clone()));
        }
        Ok(())
    }

    /// List label, e.g. `Exam (Date: 2025-06-15, Time: 09:00)`.
    pub fn display_label(&self) -> String {
        let date = if self.date.is_empty() {
            "N/A"
        } else {
            self.date.as_str()
        };
        if self.time.is_empty() {
            format!("{} (Date: {date})", self.text)
        } else {
            format!("{} (Date: {date}, Time: {})", self.text, self.time)
        }
    }
}

/// A stored record together with its stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub id: RecordId,
    pub item: T,
}

impl<T> Entry<T> {
    /// Wraps a fresh record with a newly generated id.
    pub fn new(item: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            item,
        }
    }
}

/// Field-level rejection of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyText,
    EmptyName,
    InvalidDate(String),
    InvalidTime(String),
    InvalidDataUrl,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text must not be blank"),
            Self::EmptyName => write!(f, "file name must not be blank"),
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
            Self::InvalidDataUrl => write!(f, "study file url must be a data: URI"),
        }
    }
}

impl Error for RecordValidationError {}

/// Returns whether `time` is a 24h `HH:MM` value.
pub fn is_valid_time(time: &str) -> bool {
    TIME_RE.is_match(time)
}

#[cfg(test)]
mod tests {
    use super::{RecordValidationError, ScheduledTask, StudyFile, TaskRecord};

    #[test]
    fn task_time_suffix_is_appended_only_when_present() {
        assert_eq!(
            TaskRecord::with_time(" Wash car ", Some("14:00")).text,
            "Wash car (Time: 14:00)"
        );
        assert_eq!(TaskRecord::with_time("Read", Some("  ")).text, "Read");
        assert_eq!(TaskRecord::with_time("Read", None).text, "Read");
    }

    #[test]
    fn scheduled_task_rejects_bad_dates_and_times() {
        let bad_date = ScheduledTask::new("Exam", "2025-02-30", None);
        assert_eq!(
            bad_date.validate(),
            Err(RecordValidationError::InvalidDate("2025-02-30".to_string()))
        );

        let unpadded = ScheduledTask::new("Exam", "2025-6-15", None);
        assert!(matches!(
            unpadded.validate(),
            Err(RecordValidationError::InvalidDate(_))
        ));

        let bad_time = ScheduledTask::new("Exam", "2025-06-15", Some("25:00"));
        assert!(matches!(
            bad_time.validate(),
            Err(RecordValidationError::InvalidTime(_))
        ));

        assert!(ScheduledTask::new("Exam", "2025-06-15", Some("09:00"))
            .validate()
            .is_ok());
    }

    #[test]
    fn display_label_matches_list_rendering() {
        let with_time = ScheduledTask::new("Exam", "2025-06-15", Some("09:00"));
        assert_eq!(
            with_time.display_label(),
            "Exam (Date: 2025-06-15, Time: 09:00)"
        );

        let undated = ScheduledTask::new("Legacy", "", None);
        assert_eq!(undated.display_label(), "Legacy (Date: N/A)");
    }

    #[test]
    fn task_record_reads_bare_strings_and_writes_objects() {
        let bare: TaskRecord = serde_json::from_str(r#""Wash car""#).unwrap();
        assert_eq!(bare.text, "Wash car");

        let object: TaskRecord = serde_json::from_str(r#"{"text":"Read"}"#).unwrap();
        assert_eq!(object.text, "Read");

        assert_eq!(
            serde_json::to_string(&bare).unwrap(),
            r#"{"text":"Wash car"}"#
        );
        assert!(serde_json::from_str::<TaskRecord>("42").is_err());
    }

    #[test]
    fn scheduled_task_time_defaults_to_empty_when_missing() {
        let task: ScheduledTask =
            serde_json::from_str(r#"{"text":"Exam","date":"2025-06-15"}"#).unwrap();
        assert_eq!(task.time, "");
    }

    #[test]
    fn study_file_requires_name_and_data_uri() {
        let file = StudyFile {
            name: "notes.pdf".to_string(),
            url: "data:application/pdf;base64,JVBERi0=".to_string(),
        };
        assert!(file.validate().is_ok());

        let remote = StudyFile {
            url: "https://example.com/notes.pdf".to_string(),
            ..file.clone()
        };
        assert_eq!(remote.validate(), Err(RecordValidationError::InvalidDataUrl));

        let unnamed = StudyFile {
            name: " ".to_string(),
            ..file
        };
        assert_eq!(unnamed.validate(), Err(RecordValidationError::EmptyName));
    }
}
