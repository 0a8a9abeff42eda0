//! Command dispatch against the core services.

use crate::cli::{
    CalendarAction, Commands, NoteCommand, RecordRef, ScheduleCommand, StudyCommand, TaskCommand,
};
use crate::prompt::PromptInput;
use crate::render::{render_list, render_month};
use crate::upload::{encode_study_file, mime_of};
use anyhow::{bail, Context, Result};
use planboard_core::{
    CalendarService, CollectionStore, DaySelection, Entry, KeyValueStore, MonthCursor,
    PlannerService, RepoResult,
};

/// Runs one command and returns the text to print.
pub fn run<S: KeyValueStore + Copy>(store: CollectionStore<S>, command: Commands) -> Result<String> {
    let planner = PlannerService::new(store);
    match command {
        Commands::Task { command } => run_task(&planner, command),
        Commands::Note { command } => run_note(&planner, command),
        Commands::Study { command } => run_study(&planner, command),
        Commands::Schedule { command } => run_schedule(&planner, command),
        Commands::Calendar {
            year,
            month,
            prev,
            next,
            action,
        } => {
            let calendar = CalendarService::new(store);
            let offset = i64::from(next.unwrap_or(0)) - i64::from(prev.unwrap_or(0));
            let cursor = select_month(year, month, offset)?;
            match action {
                None => Ok(render_month(&calendar.render(cursor)?)),
                Some(CalendarAction::Pick { day }) => {
                    let stdin = std::io::stdin();
                    let mut input = PromptInput::new(stdin.lock(), std::io::stdout());
                    let outcome = calendar.select_day(cursor, day, &mut input)?;
                    let mut out = match outcome {
                        DaySelection::Cancelled => "Cancelled.\n".to_string(),
                        DaySelection::EmptyText => "Nothing to add.\n".to_string(),
                        DaySelection::Created(entry) => {
                            format!("Scheduled: {}\n", entry.item.display_label())
                        }
                    };
                    out.push_str(&render_month(&calendar.render(cursor)?));
                    Ok(out)
                }
            }
        }
        Commands::Ping => Ok(format!("planboard_core ping={}\n", planboard_core::ping())),
        Commands::Version => Ok(format!(
            "planboard_core version={}\n",
            planboard_core::core_version()
        )),
    }
}

fn run_task<S: KeyValueStore>(planner: &PlannerService<S>, command: TaskCommand) -> Result<String> {
    match command {
        TaskCommand::Add { period, text, time } => {
            let entry = planner.add_task(period, &text, time.as_deref())?;
            Ok(format!("Added {} task: {}\n", period.label(), entry.item.text))
        }
        TaskCommand::List { period } => {
            let tasks = planner.list_tasks(period)?;
            Ok(render_list(&tasks, |task| task.text.clone()))
        }
        TaskCommand::Done { period, target } => {
            let removed = remove(
                target,
                |id| planner.complete_task(period, id),
                |index| planner.complete_task_at(period, index),
            )?;
            Ok(format!("Completed: {}\n", removed.item.text))
        }
    }
}

fn run_note<S: KeyValueStore>(planner: &PlannerService<S>, command: NoteCommand) -> Result<String> {
    match command {
        NoteCommand::Add { text } => {
            planner.add_note(&text)?;
            Ok("Note added.\n".to_string())
        }
        NoteCommand::List => Ok(render_list(&planner.list_notes()?, |note| note.clone())),
        NoteCommand::Rm { target } => {
            let removed = remove(
                target,
                |id| planner.delete_note(id),
                |index| planner.delete_note_at(index),
            )?;
            Ok(format!("Deleted note: {}\n", removed.item))
        }
    }
}

fn run_study<S: KeyValueStore>(
    planner: &PlannerService<S>,
    command: StudyCommand,
) -> Result<String> {
    match command {
        StudyCommand::Add { paths } => {
            let files = paths
                .iter()
                .map(|path| encode_study_file(path))
                .collect::<Result<Vec<_>>>()?;
            let added = planner.add_study_files(files)?;
            Ok(format!("Added {} study file(s).\n", added.len()))
        }
        StudyCommand::List => Ok(render_list(&planner.list_study_files()?, |file| {
            format!("{} ({})", file.name, mime_of(&file.url))
        })),
        StudyCommand::Rm { target } => {
            let removed = remove(
                target,
                |id| planner.delete_study_file(id),
                |index| planner.delete_study_file_at(index),
            )?;
            Ok(format!("Deleted study file: {}\n", removed.item.name))
        }
    }
}

fn run_schedule<S: KeyValueStore>(
    planner: &PlannerService<S>,
    command: ScheduleCommand,
) -> Result<String> {
    match command {
        ScheduleCommand::Add { text, date, time } => {
            let entry = planner.schedule_task(&text, &date, time.as_deref())?;
            Ok(format!("Scheduled: {}\n", entry.item.display_label()))
        }
        ScheduleCommand::List => Ok(render_list(
            &planner.list_scheduled_tasks()?,
            |task| task.display_label(),
        )),
        ScheduleCommand::Done { target } => {
            let removed = remove(
                target,
                |id| planner.complete_scheduled_task(id),
                |index| planner.complete_scheduled_task_at(index),
            )?;
            Ok(format!("Completed: {}\n", removed.item.display_label()))
        }
    }
}

fn remove<T>(
    target: RecordRef,
    by_id: impl FnOnce(planboard_core::RecordId) -> RepoResult<Option<Entry<T>>>,
    by_position: impl FnOnce(usize) -> RepoResult<Option<Entry<T>>>,
) -> Result<Entry<T>> {
    let removed = match target {
        RecordRef::Id(id) => by_id(id)?,
        RecordRef::Position(index) => by_position(index)?,
    };
    match (removed, target) {
        (Some(entry), _) => Ok(entry),
        (None, RecordRef::Id(id)) => bail!("no record with id {id}"),
        (None, RecordRef::Position(index)) => bail!("no record number {}", index + 1),
    }
}

fn select_month(year: Option<i32>, month: Option<u32>, offset: i64) -> Result<MonthCursor> {
    let today = MonthCursor::current();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());
    let base =
        MonthCursor::new(year, month).with_context(|| format!("invalid month {year}-{month:02}"))?;
    base.shift(offset)
        .with_context(|| format!("moving {offset} month(s) from {base} leaves the calendar range"))
}
