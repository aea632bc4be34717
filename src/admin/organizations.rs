//! Organization and location creation.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::clock::Identity;
use crate::error::{ShiftError, ShiftResult};
use crate::geofence::GeofenceSpec;
use crate::models::{Coordinate, Location, Organization};
use crate::store::ShiftStore;

/// Radius applied to a new organization when none is given.
pub const DEFAULT_ORGANIZATION_RADIUS_METERS: f64 = 2000.0;

/// Radius applied to a new location when none is given.
pub const DEFAULT_LOCATION_RADIUS_METERS: f64 = 500.0;

/// Fallback radii for newly created organizations and locations.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RadiusDefaults {
    /// Radius for organizations, in meters.
    #[serde(default = "default_organization_radius")]
    pub organization_radius_meters: f64,
    /// Radius for locations, in meters.
    #[serde(default = "default_location_radius")]
    pub location_radius_meters: f64,
}

impl Default for RadiusDefaults {
    fn default() -> Self {
        Self {
            organization_radius_meters: DEFAULT_ORGANIZATION_RADIUS_METERS,
            location_radius_meters: DEFAULT_LOCATION_RADIUS_METERS,
        }
    }
}

fn default_organization_radius() -> f64 {
    DEFAULT_ORGANIZATION_RADIUS_METERS
}

fn default_location_radius() -> f64 {
    DEFAULT_LOCATION_RADIUS_METERS
}

/// Input for [`create_organization`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrganization {
    /// Human-readable name.
    pub name: String,
    /// Optional geofence center.
    pub center: Option<Coordinate>,
    /// Optional radius; [`RadiusDefaults::organization_radius_meters`] otherwise.
    pub allowed_radius_meters: Option<f64>,
}

/// Input for [`create_location`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    /// The owning organization.
    pub organization_id: String,
    /// Human-readable name.
    pub name: String,
    /// Center of the site.
    pub center: Coordinate,
    /// Optional radius; [`RadiusDefaults::location_radius_meters`] otherwise.
    pub radius_meters: Option<f64>,
}

/// Creates an active organization. Any authenticated caller may do this.
pub fn create_organization(
    store: &dyn ShiftStore,
    identity: &Identity,
    input: NewOrganization,
    defaults: &RadiusDefaults,
) -> ShiftResult<Organization> {
    let radius = input
        .allowed_radius_meters
        .unwrap_or(defaults.organization_radius_meters);
    validate_area(input.center, radius)?;

    let organization = store.save_organization(Organization {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        center: input.center,
        allowed_radius_meters: radius,
        is_active: true,
    })?;

    info!(
        organization_id = %organization.id,
        created_by = %identity.worker.id,
        "Organization created"
    );
    Ok(organization)
}

/// Creates an active location. Only managers of the organization may do this.
pub fn create_location(
    store: &dyn ShiftStore,
    identity: &Identity,
    input: NewLocation,
    defaults: &RadiusDefaults,
) -> ShiftResult<Location> {
    identity.require_manager_of(&input.organization_id, "create locations")?;
    if store.find_organization(&input.organization_id)?.is_none() {
        return Err(ShiftError::OrganizationNotFound {
            organization_id: input.organization_id,
        });
    }

    let radius = input
        .radius_meters
        .unwrap_or(defaults.location_radius_meters);
    validate_area(Some(input.center), radius)?;

    let location = store.save_location(Location {
        id: Uuid::new_v4().to_string(),
        organization_id: input.organization_id,
        name: input.name,
        center: input.center,
        radius_meters: radius,
        is_active: true,
    })?;

    info!(
        location_id = %location.id,
        organization_id = %location.organization_id,
        "Location created"
    );
    Ok(location)
}

fn validate_area(center: Option<Coordinate>, radius_meters: f64) -> ShiftResult<()> {
    // The radius is kept even without a center, so it must be valid on its own.
    let center = center.unwrap_or(Coordinate::new(0.0, 0.0));
    GeofenceSpec::new(center, radius_meters).map(|_| ())
}
