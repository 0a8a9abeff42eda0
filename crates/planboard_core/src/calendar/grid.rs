//! Week-row month grid with scheduled-task overlay.

use crate::calendar::cursor::MonthCursor;
use std::collections::HashSet;

/// Cells per week row.
pub const DAYS_PER_WEEK: usize = 7;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day of the displayed month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub has_scheduled_task: bool,
}

/// Grid slot: padding before the 1st / after the last day, or a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    Empty,
    Day(DayCell),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Day(cell) => Some(cell),
            Self::Empty => None,
        }
    }
}

/// Renderable month view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    pub title: String,
    pub weeks: Vec<[CalendarCell; DAYS_PER_WEEK]>,
}

impl MonthGrid {
    /// Iterates every cell row by row.
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells().filter_map(CalendarCell::as_day)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }
}

/// Lays out the month of `cursor` in Sunday-first week rows.
///
/// The first row is padded with `first_weekday` empty cells and the last
/// row is padded to 7. A day is flagged when its date string is in
/// `task_dates`.
pub fn build_month_grid(cursor: MonthCursor, task_dates: &HashSet<String>) -> MonthGrid {
    let leading = cursor.first_weekday() as usize;
    let days = cursor.days_in_month();

    let mut cells: Vec<CalendarCell> = Vec::with_capacity(leading + days as usize + DAYS_PER_WEEK);
    cells.extend(std::iter::repeat(CalendarCell::Empty).take(leading));
    for day in 1..=days {
        let date = format!("{:04}-{:02}-{:02}", cursor.year(), cursor.month(), day);
        let has_scheduled_task = task_dates.contains(&date);
        cells.push(CalendarCell::Day(DayCell {
            day,
            date,
            has_scheduled_task,
        }));
    }
    while cells.len() % DAYS_PER_WEEK != 0 {
        cells.push(CalendarCell::Empty);
    }

    let mut weeks = Vec::with_capacity(cells.len() / DAYS_PER_WEEK);
    let mut remaining = cells.into_iter();
    loop {
        let row: Vec<CalendarCell> = remaining.by_ref().take(DAYS_PER_WEEK).collect();
        match <[CalendarCell; DAYS_PER_WEEK]>::try_from(row) {
            Ok(week) => weeks.push(week),
            Err(_) => break,
        }
    }

    MonthGrid {
        cursor,
        title: cursor.title(),
        weeks,
    }
}
