//! Plain-text rendering of planner views.

use planboard_core::{CalendarCell, Entry, MonthGrid, WEEKDAY_LABELS};
use std::fmt::Write;

const CELL_WIDTH: usize = 4;

/// Month grid as text; days with scheduled tasks carry a `*`.
pub fn render_month(grid: &MonthGrid) -> String {
    let width = CELL_WIDTH * WEEKDAY_LABELS.len();
    let mut out = format!("{:^width$}\n", grid.title);
    for label in WEEKDAY_LABELS {
        let _ = write!(out, "{label:>3} ");
    }
    out.push('\n');

    for week in &grid.weeks {
        let mut line = String::new();
        for cell in week {
            match cell {
                CalendarCell::Empty => line.push_str("    "),
                CalendarCell::Day(day) => {
                    let marker = if day.has_scheduled_task { '*' } else { ' ' };
                    let _ = write!(line, "{:>3}{marker}", day.day);
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Numbered listing `N. label  [id]`, or `(empty)`.
pub fn render_list<T>(entries: &[Entry<T>], label: impl Fn(&T) -> String) -> String {
    if entries.is_empty() {
        return "(empty)\n".to_string();
    }
    let mut out = String::new();
    for (position, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{}. {}  [{}]", position + 1, label(&entry.item), entry.id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render_list, render_month};
    use planboard_core::{build_month_grid, Entry, MonthCursor};
    use std::collections::HashSet;

    #[test]
    fn month_marks_scheduled_days() {
        let cursor = MonthCursor::new(2025, 6).unwrap();
        let dates = HashSet::from(["2025-06-15".to_string()]);
        let text = render_month(&build_month_grid(cursor, &dates));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "June 2025");
        assert_eq!(lines[1], "Sun Mon Tue Wed Thu Fri Sat ");
        assert_eq!(lines[2], "  1   2   3   4   5   6   7");
        assert!(lines[4].starts_with(" 15*"));
        assert_eq!(text.matches('*').count(), 1);
    }

    #[test]
    fn list_is_numbered_from_one() {
        let entries = vec![Entry::new("a".to_string()), Entry::new("b".to_string())];
        let text = render_list(&entries, |note| note.clone());
        assert!(text.starts_with("1. a  ["));
        assert!(text.lines().nth(1).unwrap().starts_with("2. b  ["));
        assert_eq!(render_list::<String>(&[], |note| note.clone()), "(empty)\n");
    }
}
