//! # Domain Module
//!
//! Business logic for the booking calendar, independent of transport and
//! storage.
//!
//! - **calendar**: month grid computation and renderable month views
//! - **calendar_controller**: visible month, per-month blocked dates cache,
//!   stale fetch handling and day selection
//! - **locale**: weekday and month labels
//! - **clock**: where "now" comes from
//! - **errors**: domain error type

pub mod calendar;
pub mod calendar_controller;
pub mod clock;
pub mod errors;
pub mod locale;

pub use calendar::*;
pub use calendar_controller::*;
pub use clock::*;
pub use errors::*;
pub use locale::*;
