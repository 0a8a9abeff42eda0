use planboard_core::db::open_db_in_memory;
use planboard_core::{
    CalendarCell, CalendarError, CalendarService, CollectionStore, DaySelection, InputOutcome,
    MonthCursor, PlannerService, ScheduledTaskDraft, SqliteKeyValueStore,
};
use rusqlite::Connection;

fn kv(conn: &Connection) -> SqliteKeyValueStore<'_> {
    SqliteKeyValueStore::try_new(conn).unwrap()
}

fn submit(text: &str, time: Option<&str>) -> impl FnMut(&str) -> InputOutcome {
    let draft = ScheduledTaskDraft {
        text: text.to_string(),
        time: time.map(str::to_string),
    };
    move |_date: &str| InputOutcome::Submitted(draft.clone())
}

#[test]
fn scheduled_exam_highlights_only_its_day() {
    let conn = open_db_in_memory().unwrap();
    let planner = PlannerService::new(CollectionStore::new(kv(&conn)));
    let calendar = CalendarService::new(CollectionStore::new(kv(&conn)));

    planner
        .schedule_task("Exam", "2025-06-15", Some("09:00"))
        .unwrap();

    let grid = calendar.render(MonthCursor::new(2025, 6).unwrap()).unwrap();
    assert_eq!(grid.title, "June 2025");
    for cell in grid.days() {
        assert_eq!(cell.has_scheduled_task, cell.day == 15, "day {}", cell.day);
    }

    let july = calendar.render(MonthCursor::new(2025, 7).unwrap()).unwrap();
    assert!(july.days().all(|cell| !cell.has_scheduled_task));
}

#[test]
fn render_pads_rows_to_full_weeks() {
    let conn = open_db_in_memory().unwrap();
    let calendar = CalendarService::new(CollectionStore::new(kv(&conn)));

    // February 2026 starts on a Sunday and spans exactly four rows.
    let february = calendar.render(MonthCursor::new(2026, 2).unwrap()).unwrap();
    assert_eq!(february.weeks.len(), 4);
    assert!(february.cells().all(|cell| cell != &CalendarCell::Empty));

    // March 2025 starts on a Saturday.
    let march = calendar.render(MonthCursor::new(2025, 3).unwrap()).unwrap();
    assert_eq!(march.weeks.len(), 6);
    assert_eq!(march.weeks[0][6].as_day().map(|cell| cell.day), Some(1));
    assert!(march.weeks[5][2..].iter().all(|cell| cell == &CalendarCell::Empty));
}

#[test]
fn selecting_a_day_creates_task_and_rerender_flags_it() {
    let conn = open_db_in_memory().unwrap();
    let calendar = CalendarService::new(CollectionStore::new(kv(&conn)));
    let cursor = MonthCursor::new(2024, 2).unwrap();

    let mut seen_date = String::new();
    let mut input = |date: &str| {
        seen_date = date.to_string();
        InputOutcome::Submitted(ScheduledTaskDraft {
            text: " Dentist ".to_string(),
            time: Some("".to_string()),
        })
    };
    let outcome = calendar.select_day(cursor, 29, &mut input).unwrap();
    assert_eq!(seen_date, "2024-02-29");

    let entry = match outcome {
        DaySelection::Created(entry) => entry,
        other => panic!("expected a created task, got {other:?}"),
    };
    assert_eq!(entry.item.text, "Dentist");
    assert_eq!(entry.item.date, "2024-02-29");
    assert_eq!(entry.item.time, "");

    let grid = calendar.render(cursor).unwrap();
    assert!(grid.day(29).unwrap().has_scheduled_task);
    assert_eq!(calendar.tasks_on("2024-02-29").unwrap().len(), 1);
}

#[test]
fn cancel_and_blank_submissions_are_distinct_and_write_nothing() {
    let conn = open_db_in_memory().unwrap();
    let calendar = CalendarService::new(CollectionStore::new(kv(&conn)));
    let cursor = MonthCursor::new(2025, 6).unwrap();

    let mut cancel = |_date: &str| InputOutcome::Cancelled;
    assert_eq!(
        calendar.select_day(cursor, 10, &mut cancel).unwrap(),
        DaySelection::Cancelled
    );

    let mut blank = submit("   ", Some("10:00"));
    assert_eq!(
        calendar.select_day(cursor, 10, &mut blank).unwrap(),
        DaySelection::EmptyText
    );

    assert!(calendar.tasks_on("2025-06-10").unwrap().is_empty());
}

#[test]
fn day_outside_month_is_rejected_before_prompting() {
    let conn = open_db_in_memory().unwrap();
    let calendar = CalendarService::new(CollectionStore::new(kv(&conn)));
    let cursor = MonthCursor::new(2023, 2).unwrap();

    let mut prompted = false;
    let mut input = |_date: &str| {
        prompted = true;
        InputOutcome::Cancelled
    };
    let err = calendar.select_day(cursor, 29, &mut input).unwrap_err();
    assert!(matches!(err, CalendarError::DayOutOfRange { day: 29, .. }));
    assert!(!prompted);
}

#[test]
fn invalid_time_from_input_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let calendar = CalendarService::new(CollectionStore::new(kv(&conn)));
    let cursor = MonthCursor::new(2025, 6).unwrap();

    let mut input = submit("Gym", Some("after work"));
    let err = calendar.select_day(cursor, 3, &mut input).unwrap_err();
    assert!(matches!(err, CalendarError::Validation(_)));
    assert!(calendar.tasks_on("2025-06-03").unwrap().is_empty());
}

#[test]
fn navigation_then_render_follows_cursor() {
    let conn = open_db_in_memory().unwrap();
    let calendar = CalendarService::new(CollectionStore::new(kv(&conn)));

    let cursor = MonthCursor::new(2025, 12).unwrap().next().unwrap();
    let grid = calendar.render(cursor).unwrap();
    assert_eq!(grid.title, "January 2026");
    assert_eq!(grid.days().count(), 31);

    let back = cursor.previous().and_then(MonthCursor::previous).unwrap();
    let back = calendar.render(back).unwrap();
    assert_eq!(back.title, "November 2025");
}
