//! Geofenced shift tracking for care organizations.
//!
//! Workers clock in and out of shifts from a reported GPS position. A
//! clock-in is accepted only when the position lies within the
//! organization's geofence, and a worker holds at most one active shift.
//! Managers see who is on shift and a weekly staffing dashboard.

#![warn(missing_docs)]

pub mod admin;
pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod geofence;
pub mod models;
pub mod reporting;
pub mod store;
