//! In-memory [`ShiftStore`] backed by a single lock.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Location, Organization, Shift, ShiftStatus, Worker};

use super::{NewShift, Page, ShiftClosure, ShiftStore};

#[derive(Debug, Default)]
struct Tables {
    workers: HashMap<String, Worker>,
    organizations: HashMap<String, Organization>,
    locations: HashMap<String, Location>,
    shifts: HashMap<Uuid, Shift>,
    /// Worker id to clocked-in shift id. Acts as the uniqueness constraint.
    active: HashMap<String, Uuid>,
}

impl Tables {
    fn newest_first(mut shifts: Vec<Shift>) -> Vec<Shift> {
        shifts.sort_by(|a, b| b.clock_in.time.cmp(&a.clock_in.time));
        shifts
    }
}

/// A thread-safe store holding everything in process memory.
///
/// # Example
///
/// ```
/// use shift_tracker::store::{InMemoryStore, ShiftStore};
/// use shift_tracker::models::{Worker, WorkerRole};
///
/// let store = InMemoryStore::default();
/// store.save_worker(Worker {
///     id: "w1".to_string(),
///     email: "w1@example.com".to_string(),
///     name: None,
///     role: WorkerRole::CareWorker,
///     organization_id: None,
/// }).unwrap();
/// assert!(store.find_worker("w1").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates a store pre-populated with the given directory records.
    pub fn with_directory(
        organizations: Vec<Organization>,
        locations: Vec<Location>,
        workers: Vec<Worker>,
    ) -> Self {
        let tables = Tables {
            organizations: organizations
                .into_iter()
                .map(|org| (org.id.clone(), org))
                .collect(),
            locations: locations
                .into_iter()
                .map(|loc| (loc.id.clone(), loc))
                .collect(),
            workers: workers.into_iter().map(|w| (w.id.clone(), w)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Unavailable {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Unavailable {
            message: "store lock poisoned".to_string(),
        })
    }
}

impl ShiftStore for InMemoryStore {
    fn find_worker(&self, worker_id: &str) -> Result<Option<Worker>, StoreError> {
        Ok(self.read()?.workers.get(worker_id).cloned())
    }

    fn save_worker(&self, worker: Worker) -> Result<Worker, StoreError> {
        self.write()?
            .workers
            .insert(worker.id.clone(), worker.clone());
        Ok(worker)
    }

    fn find_organization(
        &self,
        organization_id: &str,
    ) -> Result<Option<Organization>, StoreError> {
        Ok(self.read()?.organizations.get(organization_id).cloned())
    }

    fn save_organization(&self, organization: Organization) -> Result<Organization, StoreError> {
        self.write()?
            .organizations
            .insert(organization.id.clone(), organization.clone());
        Ok(organization)
    }

    fn save_location(&self, location: Location) -> Result<Location, StoreError> {
        self.write()?
            .locations
            .insert(location.id.clone(), location.clone());
        Ok(location)
    }

    fn locations_for_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Location>, StoreError> {
        Ok(self
            .read()?
            .locations
            .values()
            .filter(|loc| loc.organization_id == organization_id)
            .cloned()
            .collect())
    }

    fn find_active_shift(&self, worker_id: &str) -> Result<Option<Shift>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .active
            .get(worker_id)
            .and_then(|id| tables.shifts.get(id))
            .cloned())
    }

    fn find_shift(&self, shift_id: Uuid) -> Result<Option<Shift>, StoreError> {
        Ok(self.read()?.shifts.get(&shift_id).cloned())
    }

    fn create_shift(&self, data: NewShift) -> Result<Shift, StoreError> {
        let mut tables = self.write()?;

        if tables.active.contains_key(&data.worker_id) {
            return Err(StoreError::DuplicateActiveShift {
                worker_id: data.worker_id,
            });
        }

        let shift = Shift {
            id: Uuid::new_v4(),
            worker_id: data.worker_id,
            status: ShiftStatus::ClockedIn,
            clock_in: data.clock_in,
            clock_out: None,
            duration_minutes: None,
        };

        tables.active.insert(shift.worker_id.clone(), shift.id);
        tables.shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }

    fn update_shift(&self, shift_id: Uuid, data: ShiftClosure) -> Result<Shift, StoreError> {
        let mut tables = self.write()?;

        let shift = tables
            .shifts
            .get_mut(&shift_id)
            .ok_or(StoreError::ShiftMissing { shift_id })?;

        if shift.status != ShiftStatus::ClockedIn {
            return Err(StoreError::ShiftClosed { shift_id });
        }

        shift.status = ShiftStatus::ClockedOut;
        shift.clock_out = Some(data.clock_out);
        shift.duration_minutes = Some(data.duration_minutes);
        let closed = shift.clone();

        tables.active.remove(&closed.worker_id);
        Ok(closed)
    }

    fn shifts_for_worker(&self, worker_id: &str, page: Page) -> Result<Vec<Shift>, StoreError> {
        let tables = self.read()?;
        let shifts = tables
            .shifts
            .values()
            .filter(|s| s.worker_id == worker_id)
            .cloned()
            .collect();

        Ok(Tables::newest_first(shifts)
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect())
    }

    fn shifts_for_organization(&self, organization_id: &str) -> Result<Vec<Shift>, StoreError> {
        let tables = self.read()?;
        let shifts = tables
            .shifts
            .values()
            .filter(|s| {
                tables
                    .workers
                    .get(&s.worker_id)
                    .and_then(|w| w.organization_id.as_deref())
                    == Some(organization_id)
            })
            .cloned()
            .collect();

        Ok(Tables::newest_first(shifts))
    }
}
