//! Calendar domain logic for the booking calendar.
//!
//! This module owns the month grid computation: which cells pad the grid from
//! the neighbouring months, which days of the month can be booked, and how the
//! grid is split into Sunday-first weeks. The UI only renders what comes out of
//! here.

use chrono::NaiveDateTime;
use shared::{
    BlockedDates, CalendarDate, CalendarDay, CalendarDayType, CalendarMonthView, CalendarWeek,
    CurrentDateResponse,
};
use tracing::{debug, warn};

use super::clock::Clock;
use super::errors::CalendarError;
use super::locale::{CalendarLocale, WeekdayLabels};

const DAYS_IN_WEEK: usize = 7;

/// Build the grid of weeks for the month containing `reference`.
///
/// Returns no weeks while `blocked` is `None`: the month's blocked dates have
/// not arrived yet, and neither "all enabled" nor "all disabled" would be right.
/// Months whose padding leaves chrono's date range also yield no weeks;
/// [`CalendarService::first_of_month`] rejects those up front.
pub fn build_grid(
    reference: CalendarDate,
    blocked: Option<&BlockedDates>,
    now: NaiveDateTime,
) -> Vec<CalendarWeek> {
    let Some(blocked) = blocked else {
        return Vec::new();
    };

    let Some((grid_start, grid_end)) = reference.grid_bounds() else {
        warn!(
            year = reference.year(),
            month = reference.month(),
            "Calendar grid would leave the supported date range"
        );
        return Vec::new();
    };

    let first_of_month = reference.first_of_month();
    let days_in_month = first_of_month.days_in_month();
    let last_of_month = first_of_month.add_days(i64::from(days_in_month) - 1);
    debug_assert_eq!(grid_start.weekday_index(), 0);
    debug_assert_eq!(grid_end.weekday_index(), 6);

    let leading = i64::from(first_of_month.weekday_index());
    let trailing = i64::from(6 - last_of_month.weekday_index());

    let padding_before = (1..=leading).rev().map(|offset| CalendarDay {
        date: first_of_month.add_days(-offset),
        disabled: true,
        day_type: CalendarDayType::PaddingBefore,
    });

    let month_days = (0..i64::from(days_in_month)).map(|offset| {
        let date = first_of_month.add_days(offset);
        CalendarDay {
            date,
            disabled: date.is_past(now) || blocked.blocks(date),
            day_type: CalendarDayType::MonthDay,
        }
    });

    let padding_after = (1..=trailing).map(|offset| CalendarDay {
        date: last_of_month.add_days(offset),
        disabled: true,
        day_type: CalendarDayType::PaddingAfter,
    });

    let days: Vec<CalendarDay> = padding_before.chain(month_days).chain(padding_after).collect();
    debug_assert_eq!(days.len() % DAYS_IN_WEEK, 0);

    days.chunks(DAYS_IN_WEEK)
        .zip(1..)
        .map(|(week_days, week)| CalendarWeek {
            week,
            days: week_days.to_vec(),
        })
        .collect()
}

/// Calendar service that turns grids into renderable month views
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarService {
    locale: CalendarLocale,
}

impl CalendarService {
    pub fn new(locale: CalendarLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> CalendarLocale {
        self.locale
    }

    /// Generate the full month view: title, header labels and weeks
    pub fn generate_calendar_month(
        &self,
        reference: CalendarDate,
        blocked: Option<&BlockedDates>,
        now: NaiveDateTime,
    ) -> CalendarMonthView {
        let weeks = build_grid(reference, blocked, now);
        debug!(
            year = reference.year(),
            month = reference.month(),
            weeks = weeks.len(),
            ready = blocked.is_some(),
            "Generated calendar grid"
        );

        CalendarMonthView {
            year: reference.year(),
            month: reference.month(),
            title: self.month_name(reference.month()).to_string(),
            weekday_labels: self.weekday_labels(),
            weeks,
        }
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        self.locale.month_name(month)
    }

    pub fn weekday_labels(&self) -> Vec<String> {
        self.locale
            .short_weekdays()
            .iter()
            .map(|label| label.to_string())
            .collect()
    }

    /// Resolve a `(year, month)` pair to the first day of that month.
    ///
    /// The year is rejected when the month, or the padding around its grid,
    /// falls outside the supported date range.
    pub fn first_of_month(&self, year: i32, month: u32) -> Result<CalendarDate, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        CalendarDate::from_ymd(year, month, 1)
            .filter(|first| first.grid_bounds().is_some())
            .ok_or(CalendarError::InvalidYear(year))
    }

    /// Format a date for human-readable display
    pub fn format_date_for_display(&self, date: CalendarDate) -> String {
        let month_name = self.month_name(date.month());
        match self.locale {
            CalendarLocale::EnUs => format!("{} {}, {}", month_name, date.day(), date.year()),
            CalendarLocale::PtBr => format!(
                "{} de {} de {}",
                date.day(),
                month_name.to_lowercase(),
                date.year()
            ),
        }
    }

    /// Get current date information
    pub fn get_current_date(&self, clock: &dyn Clock) -> CurrentDateResponse {
        let today = clock.today();
        CurrentDateResponse {
            month: today.month(),
            year: today.year(),
            day: today.day(),
            formatted_date: self.format_date_for_display(today),
            iso_date: today.to_string(),
        }
    }
}
