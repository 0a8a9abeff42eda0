//! Command-line surface definitions.

use clap::{Parser, Subcommand};
use planboard_core::{RecordId, TaskPeriod};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "planboard")]
#[command(about = "Personal task lists, notes, study files and a month calendar")]
#[command(
    after_help = "Environment:\n  PLANBOARD_DB_PATH     Database file\n  PLANBOARD_LOG_LEVEL   trace|debug|info|warn|error\n  PLANBOARD_LOG_DIR     Absolute log directory"
)]
pub struct Cli {
    /// Database file, overriding PLANBOARD_DB_PATH.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Log level, overriding PLANBOARD_LOG_LEVEL.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Daily, weekly and monthly task lists.
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    Note {
        #[command(subcommand)]
        command: NoteCommand,
    },
    /// Study material stored as embedded data URIs.
    Study {
        #[command(subcommand)]
        command: StudyCommand,
    },
    /// Tasks bound to a date.
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },
    /// Month view; days with scheduled tasks are marked `*`.
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Months to step back from the selected month.
        #[arg(long, value_name = "N", conflicts_with = "next")]
        prev: Option<u32>,
        /// Months to step forward from the selected month.
        #[arg(long, value_name = "N")]
        next: Option<u32>,
        #[command(subcommand)]
        action: Option<CalendarAction>,
    },
    Ping,
    Version,
}

#[derive(Subcommand)]
pub enum TaskCommand {
    Add {
        period: TaskPeriod,
        text: String,
        #[arg(long)]
        time: Option<String>,
    },
    List {
        period: TaskPeriod,
    },
    /// Completes (removes) a task by list number or id.
    Done {
        period: TaskPeriod,
        target: RecordRef,
    },
}

#[derive(Subcommand)]
pub enum NoteCommand {
    Add { text: String },
    List,
    Rm { target: RecordRef },
}

#[derive(Subcommand)]
pub enum StudyCommand {
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    List,
    Rm { target: RecordRef },
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    Add {
        text: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: Option<String>,
    },
    List,
    Done { target: RecordRef },
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Prompts for a task on `day` of the displayed month.
    Pick { day: u32 },
}

/// A record named on the command line: 1-based list number or full id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    Position(usize),
    Id(RecordId),
}

impl FromStr for RecordRef {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Ok(id) = RecordId::parse_str(value) {
            return Ok(Self::Id(id));
        }
        match value.parse::<usize>() {
            Ok(0) => Err("list numbers start at 1".to_string()),
            Ok(number) => Ok(Self::Position(number - 1)),
            Err(_) => Err(format!("`{value}` is neither a list number nor a record id")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, RecordRef};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn record_ref_accepts_numbers_and_ids() {
        assert_eq!("3".parse::<RecordRef>(), Ok(RecordRef::Position(2)));
        assert!("0".parse::<RecordRef>().is_err());
        assert!("abc".parse::<RecordRef>().is_err());

        let id = "6f1c9a52-1d0b-4c55-9f59-2b6a8a3e0c11";
        assert!(matches!(id.parse::<RecordRef>(), Ok(RecordRef::Id(_))));
    }

    #[test]
    fn calendar_steps_back_or_forward_but_not_both() {
        let cli = Cli::try_parse_from(["planboard", "calendar", "--prev", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Calendar {
                prev: Some(2),
                next: None,
                ..
            }
        ));

        assert!(
            Cli::try_parse_from(["planboard", "calendar", "--prev", "1", "--next", "1"]).is_err()
        );
        assert!(Cli::try_parse_from(["planboard", "calendar", "--next", "-1"]).is_err());
    }
}
