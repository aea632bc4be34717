//! Configuration types for the shift tracker.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use serde::Deserialize;

use crate::admin::RadiusDefaults;
use crate::clock::GeofencePolicy;
use crate::models::{Coordinate, Location, Organization, Worker};

/// Default address the HTTP server listens on.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

/// A location nested under its organization in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationEntry {
    /// Unique identifier for the location.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Center of the site.
    pub center: Coordinate,
    /// Permitted radius; the location default otherwise.
    #[serde(default)]
    pub radius_meters: Option<f64>,
    /// Whether the location is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// An organization entry in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationEntry {
    /// Unique identifier for the organization.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Geofence center. Omit to allow clock-in from anywhere.
    #[serde(default)]
    pub center: Option<Coordinate>,
    /// Permitted radius; the organization default otherwise.
    #[serde(default)]
    pub allowed_radius_meters: Option<f64>,
    /// Whether the organization is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Named sites of the organization.
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
}

fn default_active() -> bool {
    true
}

/// The complete shift tracker configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackerConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Which transitions are geofenced.
    #[serde(default)]
    pub geofence: GeofencePolicy,
    /// Fallback radii for organizations and locations.
    #[serde(default)]
    pub default_radius: RadiusDefaults,
    /// Organizations to seed.
    #[serde(default)]
    pub organizations: Vec<OrganizationEntry>,
    /// Workers to seed.
    #[serde(default)]
    pub workers: Vec<Worker>,
}

impl TrackerConfig {
    /// Returns the configured organizations with default radii applied.
    pub fn organizations(&self) -> Vec<Organization> {
        self.organizations
            .iter()
            .map(|entry| Organization {
                id: entry.id.clone(),
                name: entry.name.clone(),
                center: entry.center,
                allowed_radius_meters: entry
                    .allowed_radius_meters
                    .unwrap_or(self.default_radius.organization_radius_meters),
                is_active: entry.is_active,
            })
            .collect()
    }

    /// Returns every configured location with default radii applied.
    pub fn locations(&self) -> Vec<Location> {
        self.organizations
            .iter()
            .flat_map(|org| {
                org.locations.iter().map(|entry| Location {
                    id: entry.id.clone(),
                    organization_id: org.id.clone(),
                    name: entry.name.clone(),
                    center: entry.center,
                    radius_meters: entry
                        .radius_meters
                        .unwrap_or(self.default_radius.location_radius_meters),
                    is_active: entry.is_active,
                })
            })
            .collect()
    }
}
