//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the shift
//! tracker configuration from a YAML file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::admin::RadiusDefaults;
use crate::clock::GeofencePolicy;
use crate::error::{ShiftError, ShiftResult};
use crate::geofence::GeofenceSpec;
use crate::models::Coordinate;
use crate::store::InMemoryStore;

use super::types::TrackerConfig;

/// Loads, validates, and provides access to the tracker configuration.
///
/// # File Layout
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:3000"
/// geofence:
///   enforce_on_clock_in: true
///   enforce_on_clock_out: false
/// default_radius:
///   organization_radius_meters: 2000
///   location_radius_meters: 500
/// organizations:
///   - id: org_harbour
///     name: Harbour View Care
///     center: { latitude: 40.7128, longitude: -74.0060 }
///     allowed_radius_meters: 500
///     locations:
///       - id: loc_north
///         name: North Wing
///         center: { latitude: 40.7131, longitude: -74.0057 }
/// workers:
///   - id: auth0|manager
///     email: manager@example.com
///     role: manager
///     organization_id: org_harbour
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_tracker::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/shift-tracker.yaml")?;
/// println!("Listening on {}", loader.bind_address());
/// # Ok::<(), shift_tracker::error::ShiftError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TrackerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A coordinate, radius, or cross-reference is invalid
    pub fn load<P: AsRef<Path>>(path: P) -> ShiftResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ShiftError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content, &path_str)
    }

    /// Parses and validates configuration from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml(content: &str, origin: &str) -> ShiftResult<Self> {
        let config: TrackerConfig =
            serde_yaml::from_str(content).map_err(|e| ShiftError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let loader = Self { config };
        loader.validate()?;
        Ok(loader)
    }

    fn validate(&self) -> ShiftResult<()> {
        let defaults = &self.config.default_radius;
        for (label, radius) in [
            ("organization", defaults.organization_radius_meters),
            ("location", defaults.location_radius_meters),
        ] {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(invalid(format!(
                    "default {} radius must be positive, got {}",
                    label, radius
                )));
            }
        }

        let mut organization_ids = HashSet::new();
        for org in self.config.organizations() {
            if !organization_ids.insert(org.id.clone()) {
                return Err(invalid(format!("duplicate organization id '{}'", org.id)));
            }
            // A center-less organization still carries a radius.
            let center = org.center.unwrap_or(Coordinate::new(0.0, 0.0));
            GeofenceSpec::new(center, org.allowed_radius_meters)
                .map_err(|e| invalid(format!("organization '{}': {}", org.id, e)))?;
        }

        let mut location_ids = HashSet::new();
        for location in self.config.locations() {
            if !location_ids.insert(location.id.clone()) {
                return Err(invalid(format!("duplicate location id '{}'", location.id)));
            }
            location
                .geofence()
                .validate()
                .map_err(|e| invalid(format!("location '{}': {}", location.id, e)))?;
        }

        let mut worker_ids = HashSet::new();
        for worker in &self.config.workers {
            if !worker_ids.insert(worker.id.as_str()) {
                return Err(invalid(format!("duplicate worker id '{}'", worker.id)));
            }
            if let Some(org_id) = worker.organization_id.as_deref() {
                if !organization_ids.contains(org_id) {
                    return Err(invalid(format!(
                        "worker '{}' references unknown organization '{}'",
                        worker.id, org_id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the address the HTTP server should bind.
    pub fn bind_address(&self) -> &str {
        &self.config.server.bind_address
    }

    /// Returns the geofence enforcement policy.
    pub fn policy(&self) -> GeofencePolicy {
        self.config.geofence
    }

    /// Returns the fallback radii for new organizations and locations.
    pub fn radius_defaults(&self) -> RadiusDefaults {
        self.config.default_radius
    }

    /// Builds an in-memory store seeded with the configured directory.
    pub fn build_store(&self) -> InMemoryStore {
        InMemoryStore::with_directory(
            self.config.organizations(),
            self.config.locations(),
            self.config.workers.clone(),
        )
    }
}

fn invalid(message: String) -> ShiftError {
    ShiftError::ConfigInvalid { message }
}
