//! Caller identity resolution.
//!
//! The authenticated caller is resolved once per request and handed to the
//! guard explicitly; nothing in the crate reads identity from ambient state.

use tracing::warn;

use crate::error::{ShiftError, ShiftResult};
use crate::models::{Organization, Worker};
use crate::store::ShiftStore;

/// An authenticated worker together with their organization, if assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// The worker making the request.
    pub worker: Worker,
    /// The worker's organization record.
    pub organization: Option<Organization>,
}

impl Identity {
    /// Fails with [`ShiftError::Unauthorized`] unless the caller is a manager.
    pub fn require_manager(&self, action: &str) -> ShiftResult<()> {
        if self.worker.is_manager() {
            Ok(())
        } else {
            Err(ShiftError::unauthorized(format!(
                "Only managers can {}",
                action
            )))
        }
    }

    /// Fails with [`ShiftError::Unauthorized`] unless the caller manages `organization_id`.
    pub fn require_manager_of(&self, organization_id: &str, action: &str) -> ShiftResult<()> {
        let manages = self.worker.is_manager()
            && self.worker.organization_id.as_deref() == Some(organization_id);
        if manages {
            Ok(())
        } else {
            Err(ShiftError::unauthorized(format!(
                "Only managers of this organization can {}",
                action
            )))
        }
    }
}

/// Resolves the caller's worker id into an [`Identity`].
///
/// A missing id yields [`ShiftError::NotAuthenticated`]; an id with no
/// worker record yields [`ShiftError::WorkerNotFound`].
pub fn resolve_identity(store: &dyn ShiftStore, worker_id: Option<&str>) -> ShiftResult<Identity> {
    let worker_id = worker_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ShiftError::NotAuthenticated)?;

    let worker = store
        .find_worker(worker_id)?
        .ok_or_else(|| ShiftError::WorkerNotFound {
            worker_id: worker_id.to_string(),
        })?;

    let organization = match worker.organization_id.as_deref() {
        Some(organization_id) => {
            let organization = store.find_organization(organization_id)?;
            if organization.is_none() {
                warn!(
                    worker_id = %worker.id,
                    organization_id,
                    "Worker references an unknown organization"
                );
            }
            organization
        }
        None => None,
    };

    Ok(Identity {
        worker,
        organization,
    })
}
