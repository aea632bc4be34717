//! Shift and location listings.

use crate::clock::Identity;
use crate::error::{ShiftError, ShiftResult};
use crate::models::{Location, Shift};
use crate::store::{Page, ShiftStore};

/// Returns the caller's active shift, if any.
pub fn current_shift(store: &dyn ShiftStore, identity: &Identity) -> ShiftResult<Option<Shift>> {
    Ok(store.find_active_shift(&identity.worker.id)?)
}

/// Returns the caller's shifts, newest clock-in first.
pub fn shift_history(
    store: &dyn ShiftStore,
    identity: &Identity,
    page: Page,
) -> ShiftResult<Vec<Shift>> {
    Ok(store.shifts_for_worker(&identity.worker.id, page)?)
}

/// Returns the active shifts of an organization's workers, newest first.
/// Manager only.
pub fn clocked_in_staff(
    store: &dyn ShiftStore,
    identity: &Identity,
    organization_id: &str,
) -> ShiftResult<Vec<Shift>> {
    identity.require_manager("view clocked-in staff")?;
    require_organization(store, organization_id)?;

    Ok(store
        .shifts_for_organization(organization_id)?
        .into_iter()
        .filter(Shift::is_active)
        .collect())
}

/// Returns an organization's active locations sorted by name.
pub fn active_locations(
    store: &dyn ShiftStore,
    organization_id: &str,
) -> ShiftResult<Vec<Location>> {
    require_organization(store, organization_id)?;

    let mut locations: Vec<Location> = store
        .locations_for_organization(organization_id)?
        .into_iter()
        .filter(|loc| loc.is_active)
        .collect();
    locations.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(locations)
}

fn require_organization(store: &dyn ShiftStore, organization_id: &str) -> ShiftResult<()> {
    match store.find_organization(organization_id)? {
        Some(_) => Ok(()),
        None => Err(ShiftError::OrganizationNotFound {
            organization_id: organization_id.to_string(),
        }),
    }
}
