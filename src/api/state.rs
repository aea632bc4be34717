//! Application state for the shift tracker API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::admin::RadiusDefaults;
use crate::clock::GeofencePolicy;
use crate::config::ConfigLoader;
use crate::store::ShiftStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// shift store, the geofence policy, and the default radii.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ShiftStore>,
    policy: GeofencePolicy,
    radius_defaults: RadiusDefaults,
}

impl AppState {
    /// Creates a new application state around `store`.
    pub fn new(
        store: Arc<dyn ShiftStore>,
        policy: GeofencePolicy,
        radius_defaults: RadiusDefaults,
    ) -> Self {
        Self {
            store,
            policy,
            radius_defaults,
        }
    }

    /// Creates state from a loaded configuration, seeding an in-memory store.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(
            Arc::new(config.build_store()),
            config.policy(),
            config.radius_defaults(),
        )
    }

    /// Returns the shift store.
    pub fn store(&self) -> &dyn ShiftStore {
        self.store.as_ref()
    }

    /// Returns the geofence enforcement policy.
    pub fn policy(&self) -> &GeofencePolicy {
        &self.policy
    }

    /// Returns the default radii for new organizations and locations.
    pub fn radius_defaults(&self) -> &RadiusDefaults {
        &self.radius_defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_store() {
        let state = AppState::new(
            Arc::new(InMemoryStore::default()),
            GeofencePolicy::default(),
            RadiusDefaults::default(),
        );
        let clone = state.clone();
        assert!(std::ptr::addr_eq(state.store(), clone.store()));
    }
}
