//! # Storage Traits
//!
//! Abstraction over wherever blocked dates come from, so the controller and
//! REST layer work the same against a file, a remote API or a test double.

use async_trait::async_trait;
use shared::BlockedDates;

use crate::domain::CalendarError;

/// Per-month blocked dates for a user's booking calendar
#[async_trait]
pub trait BlockedDatesSource: Send + Sync {
    /// Blocked weekdays and days of the month for `month` (1-12) of `year`
    async fn blocked_dates(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> Result<BlockedDates, CalendarError>;
}
