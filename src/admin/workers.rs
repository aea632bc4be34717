//! Worker registration and assignment.

use tracing::info;

use crate::clock::Identity;
use crate::error::{ShiftError, ShiftResult};
use crate::models::{Worker, WorkerRole};
use crate::store::ShiftStore;

/// Input for [`register_worker`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorker {
    /// Identity-provider subject for the worker.
    pub id: String,
    /// Contact email.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional role; care worker otherwise.
    pub role: Option<WorkerRole>,
    /// Optional organization assignment.
    pub organization_id: Option<String>,
}

/// Registers a worker on first sign-in.
///
/// Registering an id that already exists returns the stored record
/// unchanged.
pub fn register_worker(store: &dyn ShiftStore, input: NewWorker) -> ShiftResult<Worker> {
    if let Some(existing) = store.find_worker(&input.id)? {
        return Ok(existing);
    }
    if let Some(organization_id) = input.organization_id.as_deref() {
        require_organization(store, organization_id)?;
    }

    let worker = store.save_worker(Worker {
        id: input.id,
        email: input.email,
        name: input.name,
        role: input.role.unwrap_or_default(),
        organization_id: input.organization_id,
    })?;

    info!(worker_id = %worker.id, "Worker registered");
    Ok(worker)
}

/// Changes a worker's role. Manager only.
pub fn update_worker_role(
    store: &dyn ShiftStore,
    identity: &Identity,
    worker_id: &str,
    role: WorkerRole,
) -> ShiftResult<Worker> {
    identity.require_manager("update user roles")?;

    let mut worker = find_worker(store, worker_id)?;
    worker.role = role;
    let worker = store.save_worker(worker)?;

    info!(worker_id, updated_by = %identity.worker.id, ?role, "Worker role updated");
    Ok(worker)
}

/// Moves a worker into an organization. Manager only.
pub fn assign_worker_to_organization(
    store: &dyn ShiftStore,
    identity: &Identity,
    worker_id: &str,
    organization_id: &str,
) -> ShiftResult<Worker> {
    identity.require_manager("assign users to organizations")?;
    require_organization(store, organization_id)?;

    let mut worker = find_worker(store, worker_id)?;
    worker.organization_id = Some(organization_id.to_string());
    let worker = store.save_worker(worker)?;

    info!(worker_id, organization_id, "Worker assigned to organization");
    Ok(worker)
}

fn find_worker(store: &dyn ShiftStore, worker_id: &str) -> ShiftResult<Worker> {
    store
        .find_worker(worker_id)?
        .ok_or_else(|| ShiftError::WorkerNotFound {
            worker_id: worker_id.to_string(),
        })
}

fn require_organization(store: &dyn ShiftStore, organization_id: &str) -> ShiftResult<()> {
    if store.find_organization(organization_id)?.is_none() {
        return Err(ShiftError::OrganizationNotFound {
            organization_id: organization_id.to_string(),
        });
    }
    Ok(())
}
