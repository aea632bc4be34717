//! Core data models for the shift tracker.
//!
//! This module contains all the domain models used throughout the crate.

mod coordinate;
mod dashboard;
mod organization;
mod shift;
mod worker;

pub use coordinate::Coordinate;
pub use dashboard::{DashboardStats, WeeklyHours};
pub use organization::{Location, Organization};
pub use shift::{ClockEvent, Shift, ShiftStatus, elapsed_minutes};
pub use worker::{Worker, WorkerRole};
