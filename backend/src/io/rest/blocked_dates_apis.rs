use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::MonthQuery;
use tracing::{error, info};

use super::error_response;
use crate::AppState;

/// Create a router for blocked dates APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/users/:username/blocked-dates", get(get_blocked_dates))
}

/// Blocked weekdays and days of the month for one user and month
async fn get_blocked_dates(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/blocked-dates - query: {:?}", username, query);

    match state
        .blocked_dates_source
        .blocked_dates(&username, query.year, query.month)
        .await
    {
        Ok(blocked) => (StatusCode::OK, Json(blocked)).into_response(),
        Err(e) => {
            error!("Failed to get blocked dates for {}: {}", username, e);
            error_response(e)
        }
    }
}
