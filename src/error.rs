//! Error types for the shift tracker.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition a clock-in, clock-out, or management request can hit.
//! All of them are surfaced to the caller as-is; nothing here is retried.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the shift tracker.
///
/// Every operation in the crate returns this error type. The `Display`
/// text of each variant is the message shown to the end user.
///
/// # Example
///
/// ```
/// use shift_tracker::error::ShiftError;
///
/// let error = ShiftError::AlreadyClockedIn;
/// assert_eq!(error.to_string(), "Already clocked in");
/// ```
#[derive(Debug, Error)]
pub enum ShiftError {
    /// No caller identity was supplied.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The caller is known but lacks the privilege for the operation.
    #[error("Unauthorized - {message}")]
    Unauthorized {
        /// What the caller was not allowed to do.
        message: String,
    },

    /// The caller identity does not match any known worker.
    #[error("User not found: {worker_id}")]
    WorkerNotFound {
        /// The worker id that was looked up.
        worker_id: String,
    },

    /// The worker has not been assigned to an organization.
    #[error("User not assigned to organization")]
    NoOrganization,

    /// A clock-in was attempted while the worker already has an active shift.
    #[error("Already clocked in")]
    AlreadyClockedIn,

    /// The reported coordinate lies outside the permitted geofence.
    #[error(
        "You are not within the allowed area ({distance_meters:.0}m from center, allowed {radius_meters:.0}m)"
    )]
    OutsideAllowedArea {
        /// Distance from the geofence center in meters.
        distance_meters: f64,
        /// The geofence radius in meters.
        radius_meters: f64,
    },

    /// A clock-out was attempted with no active shift.
    #[error("No active shift found")]
    NoActiveShift,

    /// A clock-out named a shift that is not an active shift of the worker.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift id supplied by the caller.
        shift_id: Uuid,
    },

    /// The referenced organization does not exist.
    #[error("Organization not found: {organization_id}")]
    OrganizationNotFound {
        /// The organization id that was looked up.
        organization_id: String,
    },

    /// A coordinate was outside the valid latitude/longitude range.
    #[error("Invalid coordinate field '{field}': {message}")]
    InvalidCoordinate {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A geofence definition was invalid.
    #[error("Invalid geofence: {message}")]
    InvalidGeofence {
        /// A description of the problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but contains inconsistent data.
    #[error("Invalid configuration: {message}")]
    ConfigInvalid {
        /// A description of the inconsistency.
        message: String,
    },

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures raised by a [`ShiftStore`](crate::store::ShiftStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A second active shift was written for a worker.
    #[error("Worker '{worker_id}' already has an active shift")]
    DuplicateActiveShift {
        /// The worker whose write was rejected.
        worker_id: String,
    },

    /// An update targeted a shift the store does not hold.
    #[error("Shift '{shift_id}' does not exist")]
    ShiftMissing {
        /// The missing shift id.
        shift_id: Uuid,
    },

    /// A clock-out was written for a shift that is already clocked out.
    #[error("Shift '{shift_id}' is already clocked out")]
    ShiftClosed {
        /// The closed shift id.
        shift_id: Uuid,
    },

    /// The store could not serve the request.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return ShiftError.
pub type ShiftResult<T> = Result<T, ShiftError>;

impl ShiftError {
    /// Builds an [`ShiftError::Unauthorized`] with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ShiftError::Unauthorized {
            message: message.into(),
        }
    }
}
