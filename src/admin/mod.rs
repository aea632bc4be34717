//! Directory administration: organizations, locations, and workers.

mod organizations;
mod workers;

pub use organizations::{
    DEFAULT_LOCATION_RADIUS_METERS, DEFAULT_ORGANIZATION_RADIUS_METERS, NewLocation,
    NewOrganization, RadiusDefaults, create_location, create_organization,
};
pub use workers::{NewWorker, assign_worker_to_organization, register_worker, update_worker_role};
