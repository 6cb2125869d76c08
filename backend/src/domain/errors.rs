use shared::CalendarDate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("{0} is not available for booking")]
    DayDisabled(CalendarDate),
    #[error("Blocked dates source failed: {0}")]
    Source(String),
}
