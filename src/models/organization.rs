//! Organization and location models.
//!
//! Both carry the geofence configuration consumed by the clock-in guard.
//! An organization without a center imposes no location restriction.

use serde::{Deserialize, Serialize};

use crate::geofence::GeofenceSpec;

use super::Coordinate;

/// A care provider that workers belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for the organization.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Center of the permitted area. `None` means clock-in is allowed anywhere.
    #[serde(default)]
    pub center: Option<Coordinate>,
    /// Radius of the permitted area around `center`, in meters.
    pub allowed_radius_meters: f64,
    /// Whether the organization is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Organization {
    /// Returns the organization's geofence, or `None` when no center is configured.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_tracker::models::{Coordinate, Organization};
    ///
    /// let mut org = Organization {
    ///     id: "org_1".to_string(),
    ///     name: "Harbour View Care".to_string(),
    ///     center: None,
    ///     allowed_radius_meters: 500.0,
    ///     is_active: true,
    /// };
    /// assert!(org.geofence().is_none());
    ///
    /// org.center = Some(Coordinate::new(40.7128, -74.0060));
    /// assert_eq!(org.geofence().unwrap().radius_meters, 500.0);
    /// ```
    pub fn geofence(&self) -> Option<GeofenceSpec> {
        self.center.map(|center| GeofenceSpec {
            center,
            radius_meters: self.allowed_radius_meters,
        })
    }
}

/// A named site within an organization, with its own permitted radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier for the location.
    pub id: String,
    /// The owning organization.
    pub organization_id: String,
    /// Human-readable name.
    pub name: String,
    /// Center of the site.
    pub center: Coordinate,
    /// Permitted radius around the center, in meters.
    pub radius_meters: f64,
    /// Whether the location is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Location {
    /// Returns the location's geofence.
    pub fn geofence(&self) -> GeofenceSpec {
        GeofenceSpec {
            center: self.center,
            radius_meters: self.radius_meters,
        }
    }
}

fn default_active() -> bool {
    true
}
