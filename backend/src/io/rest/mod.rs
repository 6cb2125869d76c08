//! # REST API Interface Layer
//!
//! HTTP endpoints for the booking calendar. Handlers only translate between
//! HTTP and the domain: query parsing, status codes and JSON bodies.
//!
//! - `GET /api/users/:username/blocked-dates?year=&month=`
//! - `GET /api/users/:username/calendar?year=&month=`
//! - `GET /api/calendar/current-date`
//!
//! `month` is always 1-12 on the wire.

pub mod blocked_dates_apis;
pub mod calendar_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::CalendarError;

/// Translate a domain error into an HTTP response
pub fn error_response(error: CalendarError) -> Response {
    let status = match &error {
        CalendarError::InvalidMonth(_)
        | CalendarError::InvalidYear(_)
        | CalendarError::UnsupportedLocale(_)
        | CalendarError::DayDisabled(_) => StatusCode::BAD_REQUEST,
        CalendarError::UnknownUser(_) => StatusCode::NOT_FOUND,
        CalendarError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string()).into_response()
}
