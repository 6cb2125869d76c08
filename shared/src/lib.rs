use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Get the number of days in a given month (1-12) and year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Immutable calendar date value.
///
/// All arithmetic returns a new value; nothing mutates in place. Serializes as
/// an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a date from year, month (1-12) and day, `None` if it does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in the local timezone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1-12
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, 1-31
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of the week with Sunday = 0 .. Saturday = 6
    pub fn weekday_index(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    pub fn first_of_month(&self) -> Self {
        self.add_days(-i64::from(self.0.day0()))
    }

    pub fn last_of_month(&self) -> Self {
        self.first_of_month().add_days(i64::from(self.days_in_month()) - 1)
    }

    /// Shift by whole days.
    ///
    /// Only for shifts known to stay inside chrono's date range, such as moves
    /// within a month or a grid already checked with [`grid_bounds`](Self::grid_bounds).
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Shift by whole days, `None` past the ends of the supported range
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    /// Shift by whole months, `None` past the ends of the supported range.
    /// The day is clamped to the target month's length.
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let shift = Months::new(months.unsigned_abs());
        if months >= 0 {
            self.0.checked_add_months(shift).map(Self)
        } else {
            self.0.checked_sub_months(shift).map(Self)
        }
    }

    /// First and last dates of the Sunday-first grid around this date's month.
    ///
    /// `None` when the padding would leave the supported date range.
    pub fn grid_bounds(&self) -> Option<(Self, Self)> {
        let first_of_month = self.first_of_month();
        let last_of_month = self.last_of_month();
        let start = first_of_month.checked_add_days(-i64::from(first_of_month.weekday_index()))?;
        let end = last_of_month.checked_add_days(i64::from(6 - last_of_month.weekday_index()))?;
        Some((start, end))
    }

    /// Last representable instant of this day (23:59:59.999)
    pub fn end_of_day(&self) -> NaiveDateTime {
        // 23:59:59.999 is always a valid time of day
        self.0
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// True once the whole day lies strictly before `now`
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.end_of_day() < now
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Blocked weekdays and days of the month for one month of one user's calendar.
///
/// Wire format matches the blocked-dates endpoint:
/// `{ "blockedWeekDays": [0, 6], "blockedDates": [1, 25] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDates {
    /// Weekdays, Sunday = 0 .. Saturday = 6
    pub blocked_week_days: BTreeSet<u32>,
    /// Days of the month, 1-31
    pub blocked_dates: BTreeSet<u32>,
}

impl BlockedDates {
    pub fn new(
        blocked_week_days: impl IntoIterator<Item = u32>,
        blocked_dates: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            blocked_week_days: blocked_week_days.into_iter().collect(),
            blocked_dates: blocked_dates.into_iter().collect(),
        }
    }

    /// Whether either rule blocks the given date
    pub fn blocks(&self, date: CalendarDate) -> bool {
        self.blocked_week_days.contains(&date.weekday_index())
            || self.blocked_dates.contains(&date.day())
    }
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Padding day from the previous month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Padding day from the next month
    PaddingAfter,
}

/// A single cell of the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    pub date: CalendarDate,
    pub disabled: bool,
    pub day_type: CalendarDayType,
}

impl CalendarDay {
    pub fn is_padding(&self) -> bool {
        self.day_type != CalendarDayType::MonthDay
    }
}

/// One row of the calendar grid, always 7 days starting on Sunday
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarWeek {
    /// 1-based row index
    pub week: u32,
    pub days: Vec<CalendarDay>,
}

/// Everything needed to render one month of the booking calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonthView {
    pub year: i32,
    pub month: u32,
    /// Localized month name, e.g. "October"
    pub title: String,
    /// Short weekday names, Sunday first
    pub weekday_labels: Vec<String>,
    /// Empty while the month's blocked dates are not available
    pub weeks: Vec<CalendarWeek>,
}

/// Query parameters identifying one month; `month` is 1-12
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

/// Current date information from the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    pub formatted_date: String,
    pub iso_date: String,
}
