//! # Booking Calendar Backend
//!
//! Non-UI logic for the booking calendar: the month grid, per-user blocked
//! dates and the REST API that exposes them.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (any client)
//!     ↓
//! IO Layer (REST API)
//!     ↓
//! Domain Layer (grid builder, controller)
//!     ↓
//! Storage Layer (blocked dates sources)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{CalendarService, Clock, SystemClock};
use crate::storage::{AvailabilityRepository, BlockedDatesSource};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub calendar_service: CalendarService,
    pub blocked_dates_source: Arc<dyn BlockedDatesSource>,
    pub clock: Arc<dyn Clock>,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up availability storage");
    let repository = match &config.availability_file {
        Some(path) => AvailabilityRepository::from_file(path)?,
        None => {
            info!("No availability file configured, every user will be unknown");
            AvailabilityRepository::default()
        }
    };

    info!("Setting up domain model with locale {:?}", config.locale);
    Ok(AppState {
        calendar_service: CalendarService::new(config.locale),
        blocked_dates_source: Arc::new(repository),
        clock: Arc::new(SystemClock),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(io::calendar_apis::router())
        .merge(io::blocked_dates_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
