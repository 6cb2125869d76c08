use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::MonthQuery;
use tracing::{error, info, warn};

use super::error_response;
use crate::domain::CalendarError;
use crate::AppState;

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar/current-date", get(get_current_date))
        .route("/users/:username/calendar", get(get_user_calendar))
}

/// Month view for a user's booking calendar.
///
/// When the blocked dates cannot be loaded the view is still returned, with
/// no weeks, so the client shows the month header and can retry.
async fn get_user_calendar(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/calendar - query: {:?}", username, query);

    let reference = match state.calendar_service.first_of_month(query.year, query.month) {
        Ok(date) => date,
        Err(e) => {
            warn!("Rejected calendar request: {}", e);
            return error_response(e);
        }
    };

    let blocked = match state
        .blocked_dates_source
        .blocked_dates(&username, query.year, query.month)
        .await
    {
        Ok(blocked) => Some(blocked),
        Err(e @ CalendarError::Source(_)) => {
            warn!("Blocked dates unavailable for {}, returning empty grid: {}", username, e);
            None
        }
        Err(e) => {
            error!("Failed to get blocked dates for {}: {}", username, e);
            return error_response(e);
        }
    };

    let view = state.calendar_service.generate_calendar_month(
        reference,
        blocked.as_ref(),
        state.clock.now(),
    );
    (StatusCode::OK, Json(view)).into_response()
}

/// Get current date information from the backend
async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    let current_date = state.calendar_service.get_current_date(state.clock.as_ref());
    (StatusCode::OK, Json(current_date)).into_response()
}
