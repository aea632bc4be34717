//! Shift model and related types.
//!
//! This module defines the [`Shift`] record and its two-state
//! [`ShiftStatus`]. A shift is created in [`ShiftStatus::ClockedIn`] and
//! moves exactly once to [`ShiftStatus::ClockedOut`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Coordinate;

/// The lifecycle state of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    /// The worker is on shift.
    ClockedIn,
    /// The shift has ended. Terminal.
    ClockedOut,
}

/// The clock-in or clock-out event of a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// When the event was recorded by the server.
    pub time: DateTime<Utc>,
    /// Where the worker reported being.
    pub coordinate: Coordinate,
    /// Optional free-text address supplied by the client.
    #[serde(default)]
    pub address: Option<String>,
    /// Optional note supplied by the worker.
    #[serde(default)]
    pub note: Option<String>,
}

/// A single work session bounded by a clock-in and, eventually, a clock-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The worker who owns the shift.
    pub worker_id: String,
    /// Current lifecycle state.
    pub status: ShiftStatus,
    /// The clock-in event.
    pub clock_in: ClockEvent,
    /// The clock-out event, present once the shift is clocked out.
    #[serde(default)]
    pub clock_out: Option<ClockEvent>,
    /// Whole minutes between clock-in and clock-out.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

impl Shift {
    /// Returns true while the shift is clocked in.
    pub fn is_active(&self) -> bool {
        self.status == ShiftStatus::ClockedIn
    }

    /// Returns the worked hours of a completed shift.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_tracker::models::{ClockEvent, Coordinate, Shift, ShiftStatus};
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let event = ClockEvent {
    ///     time: Utc::now(),
    ///     coordinate: Coordinate::new(0.0, 0.0),
    ///     address: None,
    ///     note: None,
    /// };
    /// let shift = Shift {
    ///     id: Uuid::new_v4(),
    ///     worker_id: "w1".to_string(),
    ///     status: ShiftStatus::ClockedOut,
    ///     clock_in: event.clone(),
    ///     clock_out: Some(event),
    ///     duration_minutes: Some(90),
    /// };
    /// assert_eq!(shift.worked_hours(), Some(Decimal::new(15, 1))); // 1.5 hours
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        self.duration_minutes
            .map(|minutes| Decimal::new(minutes, 0) / Decimal::new(60, 0))
    }
}

/// Whole minutes elapsed from `start` to `end`, floored and never negative.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use shift_tracker::models::elapsed_minutes;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 1, 15, 10, 32, 15).unwrap();
/// assert_eq!(elapsed_minutes(start, end), 32);
/// ```
pub fn elapsed_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes().max(0)
}
