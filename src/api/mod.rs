//! Thin adapters over Google's REST APIs.

pub mod calendar_api;

pub use calendar_api::CalendarClient;
