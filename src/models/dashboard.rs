//! Staffing dashboard models returned to managers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours worked by one worker during the current week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// The worker's id.
    pub worker_id: String,
    /// The worker's display name, or email when unnamed.
    pub worker_name: String,
    /// Sum of completed shift hours since the start of the week.
    pub total_hours: Decimal,
}

/// Aggregate staffing figures for one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// The organization the figures describe.
    pub organization_id: String,
    /// Number of shifts currently clocked in.
    pub total_staff_clocked_in: usize,
    /// Number of shifts clocked in since midnight today.
    pub total_clocked_in_today: usize,
    /// Total weekly hours spread over seven days, rounded to two places.
    pub average_hours_per_day: Decimal,
    /// Per-worker weekly hours, ordered by each worker's most recent shift.
    pub weekly_hours_by_staff: Vec<WeeklyHours>,
}
