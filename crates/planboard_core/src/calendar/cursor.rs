//! Displayed-month cursor and month arithmetic.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt::{Display, Formatter};

/// The `(year, month)` pair a calendar view is showing.
///
/// `month` is 1-based (January = 1). Every cursor names a month chrono can
/// represent; navigation past that range returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthCursor {
    first_day: NaiveDate,
}

impl MonthCursor {
    /// Returns `None` when `month` is outside `1..=12` or `year` is outside
    /// the range chrono can represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// Month containing today's local date.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Previous month; January rolls back to December of the prior year.
    pub fn previous(self) -> Option<Self> {
        self.shift(-1)
    }

    /// Next month; December rolls over to January of the following year.
    pub fn next(self) -> Option<Self> {
        self.shift(1)
    }

    /// Moves by `months`, negative values going backwards.
    pub fn shift(self, months: i64) -> Option<Self> {
        let index = i64::from(self.year())
            .checked_mul(12)?
            .checked_add(i64::from(self.first_day.month0()))?
            .checked_add(months)?;
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::new(year, month)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Weekday of the 1st, 0 = Sunday.
    pub fn first_weekday(&self) -> u32 {
        self.first_day.weekday().num_days_from_sunday()
    }

    /// `YYYY-MM-DD` for `day` of this month, or `None` past the month end.
    pub fn date_string(&self, day: u32) -> Option<String> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }
        Some(format!("{:04}-{:02}-{:02}", self.year(), self.month(), day))
    }

    /// Header text such as `June 2025`.
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Number of days in `month` (1-based) of `year`.
///
/// Computed as the day before the first of the following month, which
/// covers leap years. Returns 0 for an invalid month or unrepresentable year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return 0;
    }
    if month == 12 {
        return 31;
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(0, |last| last.day())
}
