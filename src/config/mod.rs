//! Configuration loading and management for the shift tracker.
//!
//! This module loads the YAML configuration: server settings, the geofence
//! enforcement policy, default radii, and the organizations, locations, and
//! workers the in-memory store is seeded with.
//!
//! # Example
//!
//! ```no_run
//! use shift_tracker::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/shift-tracker.yaml").unwrap();
//! println!("Seeded {} organizations", config.config().organizations.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BIND_ADDRESS, LocationEntry, OrganizationEntry, ServerConfig, TrackerConfig,
};
