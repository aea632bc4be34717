//! Geofencing for the shift tracker.
//!
//! This module contains the haversine distance calculator and the
//! geofence validator used to gate clock-in.
//!
//! # Example
//!
//! ```
//! use shift_tracker::geofence::{enforce_geofence, GeofenceSpec};
//! use shift_tracker::models::Coordinate;
//!
//! let spec = GeofenceSpec::new(Coordinate::new(40.7128, -74.0060), 500.0).unwrap();
//! assert!(enforce_geofence(&Coordinate::new(40.7130, -74.0062), Some(&spec)).is_ok());
//! ```

mod distance;
mod validator;

pub use distance::{EARTH_RADIUS_METERS, haversine_distance};
pub use validator::{
    GeofenceCheck, GeofenceSpec, check_geofence, enforce_geofence, is_within_radius,
};
