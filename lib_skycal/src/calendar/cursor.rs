use crate::events::{date_key, month_prefix};
use chrono::{Datelike, NaiveDate};

/// # Month Cursor
///
/// The month a calendar shows. Always a month chrono can represent, so every
/// day of it has a `NaiveDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Cursor on `month` of `year`; `None` when the month is not 1-12 or the
    /// year lies outside the supported date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Cursor on the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Year shown.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month shown, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves by `delta` months, carrying into the year. `None` past the ends
    /// of the supported date range.
    pub fn checked_shift(&self, delta: i32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(delta);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::new(year, month)
    }

    /// Like `checked_shift`, staying put at the ends of the range.
    pub fn shifted(&self, delta: i32) -> Self {
        self.checked_shift(delta).unwrap_or(*self)
    }

    /// The following month.
    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    /// The preceding month.
    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Every construction path checked this date exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        (28..=31).rev().find(|&day| self.date(day).is_some()).unwrap_or(28)
    }

    /// Empty grid cells before day 1 (Sunday = 0).
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// The date of `day` in this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Event key of `day` in this month.
    pub fn day_key(&self, day: u32) -> Option<String> {
        self.date(day).map(date_key)
    }

    /// `YYYY-MM` prefix shared by the month's event keys.
    pub fn prefix(&self) -> String {
        month_prefix(self.year, self.month)
    }

    /// Upper-case header label, e.g. `JULY 2025`.
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string().to_uppercase()
    }
}
