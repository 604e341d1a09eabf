//! Month layout for the calendar overlay
//!
//! A [`MonthGrid`] is a rectangular weeks-by-7 arrangement of a month's
//! days with Sunday fixed as the first column. Cells holding `0` are days
//! outside the month. Grids are derived per render call and never stored.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;


/// Day-name headers, Sunday first. Fixed order and language.
pub const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Errors deriving a month grid
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("month {month} out of range, expected 1-12")]
    MonthOutOfRange { month: u32 },

    #[error("year {year} is not representable")]
    YearOutOfRange { year: i32 },
}

/// A month laid out as full weeks, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    first_weekday: usize,
    weeks: Vec<[u8; 7]>,
}

impl MonthGrid {
    /// Lay out `(year, month)` into weeks. `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::MonthOutOfRange { month });
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::YearOutOfRange { year })?;
        let first_weekday = first.weekday().num_days_from_sunday() as usize;
        let days = days_in_month(year, month).ok_or(CalendarError::YearOutOfRange { year })?;

        let mut weeks = Vec::with_capacity(6);
        let mut week = [0u8; 7];
        let mut slot = first_weekday;
        for day in 1..=days {
            week[slot] = day;
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [0u8; 7];
                slot = 0;
            }
        }
        if slot != 0 {
            weeks.push(week);
        }

        Ok(Self {
            year,
            month,
            first_weekday,
            weeks,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Column index (0 = Sunday) of the first day of the month.
    pub fn first_weekday(&self) -> usize {
        self.first_weekday
    }

    /// The laid-out weeks. Zero cells are outside the month.
    pub fn weeks(&self) -> &[[u8; 7]] {
        &self.weeks
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Title line rendered above the grid, e.g. `February 2024`.
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

/// Number of days in `(year, month)`, or `None` if the date is out of
/// chrono's range. `month` is 1-based.
pub fn days_in_month(year: i32, month: u32) -> Option<u8> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u8)
}

/// Whether a column index holds the distinct "holiday" styling.
///
/// Fixed to the last two columns of the Sunday-first week (Friday and
/// Saturday positions 5 and 6). No locale-aware holiday calendar.
pub fn is_holiday_column(index: usize) -> bool {
    matches!(index, 5 | 6)
}

/// `(year, month)` for today, used when the caller leaves the target
/// date unset.
pub fn current_year_month() -> (i32, u32) {
    let today = chrono::Local::now().date_naive();
    (today.year(), today.month())
}
