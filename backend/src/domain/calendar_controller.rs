//! # Calendar Controller
//!
//! Client-side state for one booking calendar: the visible month, the blocked
//! dates fetched so far, and the selected day.
//!
//! Fetches are keyed by the month they target. A result is only applied when
//! its key still matches the visible month; results for a month the user has
//! already navigated away from are dropped, so the grid always shows the most
//! recently requested month rather than the most recently completed fetch.
//!
//! ```text
//! begin_fetch() -> key ──► source.blocked_dates(key) ──► complete_fetch(key, result)
//!        ▲                                                      │
//!        └────── previous_month() / next_month() / go_to() ◄────┘ (Stale if key moved)
//! ```

use chrono::NaiveDateTime;
use shared::{BlockedDates, CalendarDate, CalendarMonthView, CalendarWeek, MonthQuery};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::calendar::{build_grid, CalendarService};
use super::errors::CalendarError;
use crate::storage::BlockedDatesSource;

/// Invoked with the chosen date when a bookable day is activated
pub type DateSelectedCallback = Arc<dyn Fn(CalendarDate) + Send + Sync>;

/// Identifies one month; `month` is 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl From<MonthKey> for MonthQuery {
    fn from(key: MonthKey) -> Self {
        MonthQuery {
            year: key.year,
            month: key.month,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Blocked dates for the visible month were already cached
    Cached,
    /// Result stored and now drives the grid
    Applied,
    /// Result targeted a month that is no longer visible and was dropped
    Stale,
    /// Source failed for the visible month; the grid stays empty
    Failed,
}

pub struct CalendarController {
    username: String,
    service: CalendarService,
    /// Always the first day of the visible month
    reference: CalendarDate,
    cache: HashMap<MonthKey, BlockedDates>,
    pending: Option<MonthKey>,
    last_error: Option<CalendarError>,
    selected_date: Option<CalendarDate>,
    on_date_selected: Option<DateSelectedCallback>,
}

impl CalendarController {
    /// Create a controller showing the month that contains `today`
    pub fn new(username: impl Into<String>, service: CalendarService, today: CalendarDate) -> Self {
        Self {
            username: username.into(),
            service,
            reference: today.first_of_month(),
            cache: HashMap::new(),
            pending: None,
            last_error: None,
            selected_date: None,
            on_date_selected: None,
        }
    }

    pub fn with_on_date_selected(mut self, callback: DateSelectedCallback) -> Self {
        self.on_date_selected = Some(callback);
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn reference_date(&self) -> CalendarDate {
        self.reference
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::of(self.reference)
    }

    pub fn previous_month(&mut self) -> MonthKey {
        self.shift_months(-1)
    }

    pub fn next_month(&mut self) -> MonthKey {
        self.shift_months(1)
    }

    /// Jump straight to a month
    pub fn go_to(&mut self, year: i32, month: u32) -> Result<MonthKey, CalendarError> {
        self.reference = self.service.first_of_month(year, month)?;
        info!("📅 Navigated to {}", self.current_month());
        Ok(self.current_month())
    }

    /// Stays on the visible month when the target month's grid cannot be built
    fn shift_months(&mut self, months: i32) -> MonthKey {
        match self
            .reference
            .add_months(months)
            .filter(|target| target.grid_bounds().is_some())
        {
            Some(target) => {
                self.reference = target;
                info!("📅 Navigated to {}", self.current_month());
            }
            None => warn!(
                "Cannot move {} months from {}: outside the supported date range",
                months,
                self.current_month()
            ),
        }
        self.current_month()
    }

    /// Whether the visible month still needs its blocked dates
    pub fn needs_fetch(&self) -> bool {
        !self.cache.contains_key(&self.current_month())
    }

    /// A fetch for the visible month is in flight and nothing is cached for it
    pub fn is_loading(&self) -> bool {
        self.pending == Some(self.current_month()) && self.needs_fetch()
    }

    /// Mark a fetch for the visible month as started and return its key
    pub fn begin_fetch(&mut self) -> MonthKey {
        let key = self.current_month();
        self.pending = Some(key);
        self.last_error = None;
        debug!(user = %self.username, month = %key, "Fetching blocked dates");
        key
    }

    /// Hand back the result of a fetch started with [`begin_fetch`](Self::begin_fetch)
    pub fn complete_fetch(
        &mut self,
        key: MonthKey,
        result: Result<BlockedDates, CalendarError>,
    ) -> FetchOutcome {
        if self.pending == Some(key) {
            self.pending = None;
        }

        if key != self.current_month() {
            warn!(
                user = %self.username,
                fetched = %key,
                visible = %self.current_month(),
                "Discarding blocked dates for a month that is no longer visible"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(blocked) => {
                self.cache.insert(key, blocked);
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(user = %self.username, month = %key, "Failed to fetch blocked dates: {}", e);
                self.last_error = Some(e);
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch the visible month's blocked dates unless they are cached
    pub async fn refresh(&mut self, source: &dyn BlockedDatesSource) -> FetchOutcome {
        if !self.needs_fetch() {
            return FetchOutcome::Cached;
        }
        let key = self.begin_fetch();
        let result = source.blocked_dates(&self.username, key.year, key.month).await;
        self.complete_fetch(key, result)
    }

    pub fn blocked_dates(&self) -> Option<&BlockedDates> {
        self.cache.get(&self.current_month())
    }

    pub fn last_error(&self) -> Option<&CalendarError> {
        self.last_error.as_ref()
    }

    pub fn grid(&self, now: NaiveDateTime) -> Vec<CalendarWeek> {
        build_grid(self.reference, self.blocked_dates(), now)
    }

    pub fn view(&self, now: NaiveDateTime) -> CalendarMonthView {
        self.service
            .generate_calendar_month(self.reference, self.blocked_dates(), now)
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.selected_date
    }

    /// Activate a day cell.
    ///
    /// Only bookable days of the visible month are accepted. The callback, if
    /// any, receives the date; without one the selection is only recorded.
    pub fn select(&mut self, date: CalendarDate, now: NaiveDateTime) -> Result<(), CalendarError> {
        let selectable = self
            .grid(now)
            .iter()
            .flat_map(|week| week.days.iter())
            .any(|cell| cell.date == date && !cell.disabled);
        if !selectable {
            return Err(CalendarError::DayDisabled(date));
        }

        self.selected_date = Some(date);
        info!(user = %self.username, date = %date, "Date selected");
        if let Some(callback) = &self.on_date_selected {
            callback(date);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Mutex as AsyncMutex;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    fn noon(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn controller() -> CalendarController {
        CalendarController::new("alice", CalendarService::default(), date(2024, 10, 15))
    }

    /// Blocks day 1 of every month and counts calls
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BlockedDatesSource for CountingSource {
        async fn blocked_dates(
            &self,
            username: &str,
            _year: i32,
            _month: u32,
        ) -> Result<BlockedDates, CalendarError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if username == "alice" {
                Ok(BlockedDates::new([0, 6], [1]))
            } else {
                Err(CalendarError::UnknownUser(username.to_string()))
            }
        }
    }

    #[test]
    fn test_new_normalizes_to_first_of_month() {
        let c = controller();
        assert_eq!(c.reference_date(), date(2024, 10, 1));
        assert_eq!(c.current_month(), MonthKey { year: 2024, month: 10 });
    }

    #[test]
    fn test_navigation_rolls_over_years() {
        let mut c = CalendarController::new("alice", CalendarService::default(), date(2024, 12, 31));
        assert_eq!(c.next_month(), MonthKey { year: 2025, month: 1 });
        assert_eq!(c.previous_month(), MonthKey { year: 2024, month: 12 });
        c.go_to(2025, 1).unwrap();
        assert_eq!(c.previous_month(), MonthKey { year: 2024, month: 12 });
        assert_eq!(c.go_to(2025, 13), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(c.current_month(), MonthKey { year: 2024, month: 12 });
    }

    #[test]
    fn test_navigation_stops_at_range_edges() {
        let max = CalendarDate::new(NaiveDate::MAX);
        let min = CalendarDate::new(NaiveDate::MIN);

        let mut c = controller();
        c.go_to(max.year(), 11).unwrap();
        let last = c.next_month();
        assert_eq!(c.next_month(), last);
        assert_eq!(last.year, max.year());
        assert!(c.reference_date().grid_bounds().is_some());

        c.go_to(min.year(), 2).unwrap();
        let first = c.previous_month();
        assert_eq!(c.previous_month(), first);
        assert_eq!(first.year, min.year());
        assert!(c.reference_date().grid_bounds().is_some());
    }

    #[test]
    fn test_grid_empty_until_data_arrives() {
        let mut c = controller();
        assert!(c.grid(noon(2024, 10, 15)).is_empty());

        let key = c.begin_fetch();
        assert!(c.is_loading());
        assert_eq!(c.complete_fetch(key, Ok(BlockedDates::default())), FetchOutcome::Applied);
        assert!(!c.is_loading());
        assert_eq!(c.grid(noon(2024, 10, 15)).len(), 5);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut c = controller();
        let october = c.begin_fetch();
        let november = c.next_month();
        let november_fetch = c.begin_fetch();

        // October resolves after the user moved on
        assert_eq!(
            c.complete_fetch(october, Ok(BlockedDates::new([], [5]))),
            FetchOutcome::Stale
        );
        assert!(c.blocked_dates().is_none());
        assert!(c.grid(noon(2024, 10, 15)).is_empty());
        assert!(c.is_loading());

        assert_eq!(november, november_fetch);
        assert_eq!(
            c.complete_fetch(november_fetch, Ok(BlockedDates::new([], [7]))),
            FetchOutcome::Applied
        );
        assert_eq!(c.blocked_dates(), Some(&BlockedDates::new([], [7])));

        // Going back to October needs a new fetch: the stale result was never kept
        c.previous_month();
        assert!(c.needs_fetch());
    }

    #[test]
    fn test_failed_fetch_keeps_grid_empty() {
        let mut c = controller();
        let key = c.begin_fetch();
        let outcome = c.complete_fetch(key, Err(CalendarError::Source("timeout".to_string())));

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(c.last_error(), Some(&CalendarError::Source("timeout".to_string())));
        assert!(c.grid(noon(2024, 10, 15)).is_empty());

        c.begin_fetch();
        assert!(c.last_error().is_none());
    }

    #[tokio::test]
    async fn test_refresh_uses_cache() {
        let source = CountingSource { calls: AtomicUsize::new(0) };
        let mut c = controller();

        assert_eq!(c.refresh(&source).await, FetchOutcome::Applied);
        assert_eq!(c.refresh(&source).await, FetchOutcome::Cached);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        c.next_month();
        assert_eq!(c.refresh(&source).await, FetchOutcome::Applied);
        c.previous_month();
        assert_eq!(c.refresh(&source).await, FetchOutcome::Cached);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_unknown_user_fails() {
        let source = CountingSource { calls: AtomicUsize::new(0) };
        let mut c = CalendarController::new("bob", CalendarService::default(), date(2024, 10, 15));

        assert_eq!(c.refresh(&source).await, FetchOutcome::Failed);
        assert_eq!(c.last_error(), Some(&CalendarError::UnknownUser("bob".to_string())));
    }

    #[tokio::test]
    async fn test_navigation_during_in_flight_fetch() {
        let shared = Arc::new(AsyncMutex::new(controller()));
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });

        let key = shared.lock().await.begin_fetch();
        let fetch = {
            let source = source.clone();
            tokio::spawn(async move { source.blocked_dates("alice", key.year, key.month).await })
        };

        // User navigates while the request is in flight
        shared.lock().await.next_month();

        let result = fetch.await.unwrap();
        let outcome = shared.lock().await.complete_fetch(key, result);
        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(
            shared.lock().await.current_month(),
            MonthKey { year: 2024, month: 11 }
        );
    }

    #[test]
    fn test_select_invokes_callback_for_bookable_day() {
        let picked = Arc::new(Mutex::new(Vec::new()));
        let callback: DateSelectedCallback = {
            let picked = picked.clone();
            Arc::new(move |d: CalendarDate| picked.lock().unwrap().push(d))
        };
        let mut c = controller().with_on_date_selected(callback);
        let key = c.begin_fetch();
        c.complete_fetch(key, Ok(BlockedDates::new([0, 6], [1])));

        let now = noon(2024, 10, 15);
        assert!(c.select(date(2024, 10, 16), now).is_ok());
        assert_eq!(c.selected_date(), Some(date(2024, 10, 16)));
        assert_eq!(*picked.lock().unwrap(), vec![date(2024, 10, 16)]);
    }

    #[test]
    fn test_select_rejects_disabled_days() {
        let mut c = controller();
        let now = noon(2024, 10, 15);

        // Not loaded yet
        assert_eq!(
            c.select(date(2024, 10, 16), now),
            Err(CalendarError::DayDisabled(date(2024, 10, 16)))
        );

        let key = c.begin_fetch();
        c.complete_fetch(key, Ok(BlockedDates::new([0, 6], [1])));

        for rejected in [
            date(2024, 10, 1),  // blocked date
            date(2024, 10, 19), // Saturday
            date(2024, 10, 14), // past
            date(2024, 11, 1),  // padding
            date(2025, 1, 8),   // outside the grid
        ] {
            assert_eq!(c.select(rejected, now), Err(CalendarError::DayDisabled(rejected)));
        }
        assert!(c.selected_date().is_none());
    }

    #[test]
    fn test_select_without_callback_still_records() {
        let mut c = controller();
        let key = c.begin_fetch();
        c.complete_fetch(key, Ok(BlockedDates::default()));

        c.select(date(2024, 10, 20), noon(2024, 10, 15)).unwrap();
        assert_eq!(c.selected_date(), Some(date(2024, 10, 20)));
    }

    #[test]
    fn test_view_carries_labels() {
        let c = controller();
        let view = c.view(noon(2024, 10, 15));
        assert_eq!(view.title, "October");
        assert_eq!(view.weekday_labels[6], "Sat");
        assert!(view.weeks.is_empty());
    }

    #[test]
    fn test_month_key_display_and_query() {
        let key = MonthKey { year: 2024, month: 3 };
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(MonthQuery::from(key), MonthQuery { year: 2024, month: 3 });
    }
}
