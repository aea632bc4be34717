//! Geofence membership checks.
//!
//! A geofence is a circle: a center coordinate and a radius in meters.
//! Membership is inclusive, so a point exactly on the boundary is inside.

use serde::{Deserialize, Serialize};

use crate::error::{ShiftError, ShiftResult};
use crate::models::Coordinate;

use super::distance::haversine_distance;

/// A circular permitted area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceSpec {
    /// Center of the area.
    pub center: Coordinate,
    /// Allowed radius in meters. Always greater than zero.
    pub radius_meters: f64,
}

impl GeofenceSpec {
    /// Creates a geofence, rejecting invalid centers and non-positive radii.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_tracker::geofence::GeofenceSpec;
    /// use shift_tracker::models::Coordinate;
    ///
    /// assert!(GeofenceSpec::new(Coordinate::new(40.7128, -74.0060), 500.0).is_ok());
    /// assert!(GeofenceSpec::new(Coordinate::new(40.7128, -74.0060), 0.0).is_err());
    /// ```
    pub fn new(center: Coordinate, radius_meters: f64) -> ShiftResult<Self> {
        let spec = Self {
            center,
            radius_meters,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks the center and radius.
    pub fn validate(&self) -> ShiftResult<()> {
        self.center.validate()?;
        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(ShiftError::InvalidGeofence {
                message: format!(
                    "radius must be a positive number of meters, got {}",
                    self.radius_meters
                ),
            });
        }
        Ok(())
    }
}

/// The outcome of testing a point against a geofence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceCheck {
    /// Distance from the geofence center, in meters.
    pub distance_meters: f64,
    /// The geofence radius, in meters.
    pub radius_meters: f64,
    /// Whether the point is inside the geofence.
    pub within: bool,
}

/// Measures `point` against `spec`.
pub fn check_geofence(point: &Coordinate, spec: &GeofenceSpec) -> GeofenceCheck {
    let distance_meters = haversine_distance(point, &spec.center);
    GeofenceCheck {
        distance_meters,
        radius_meters: spec.radius_meters,
        within: distance_meters <= spec.radius_meters,
    }
}

/// Returns true if `point` lies within `spec`, boundary included.
///
/// # Example
///
/// ```
/// use shift_tracker::geofence::{is_within_radius, GeofenceSpec};
/// use shift_tracker::models::Coordinate;
///
/// let center = Coordinate::new(40.7128, -74.0060);
/// let spec = GeofenceSpec::new(center, 500.0).unwrap();
/// assert!(is_within_radius(&center, &spec));
/// assert!(!is_within_radius(&Coordinate::new(40.7182, -74.0060), &spec));
/// ```
pub fn is_within_radius(point: &Coordinate, spec: &GeofenceSpec) -> bool {
    check_geofence(point, spec).within
}

/// Enforces an optional geofence.
///
/// With no geofence configured every point is permitted and `Ok(None)` is
/// returned. Otherwise the measurement is returned, or
/// [`ShiftError::OutsideAllowedArea`] when the point falls outside.
pub fn enforce_geofence(
    point: &Coordinate,
    spec: Option<&GeofenceSpec>,
) -> ShiftResult<Option<GeofenceCheck>> {
    let Some(spec) = spec else {
        return Ok(None);
    };

    let check = check_geofence(point, spec);
    if !check.within {
        return Err(ShiftError::OutsideAllowedArea {
            distance_meters: check.distance_meters,
            radius_meters: check.radius_meters,
        });
    }
    Ok(Some(check))
}
