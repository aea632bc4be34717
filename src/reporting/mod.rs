//! Read-only views over shifts for workers and managers.
//!
//! Workers see their own current shift and history. Managers additionally
//! see who is on shift across the organization and a weekly staffing
//! dashboard.

mod dashboard;
mod roster;

pub use dashboard::{dashboard_stats, start_of_day, start_of_week};
pub use roster::{active_locations, clocked_in_staff, current_shift, shift_history};
