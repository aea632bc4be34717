//! Shared fixtures for the clock guard tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Coordinate, Location, Organization, Shift, Worker, WorkerRole};
use crate::store::{InMemoryStore, NewShift, Page, ShiftClosure, ShiftStore};

use super::{ClockInCommand, ClockOutCommand, Identity, resolve_identity};

pub(crate) struct Fixture {
    pub store: InMemoryStore,
}

impl Fixture {
    pub fn new() -> Self {
        let organizations = vec![
            organization("org_nyc", Some(Coordinate::new(40.7128, -74.0060)), 500.0),
            organization("org_open", None, 2000.0),
            organization("org_equator", Some(Coordinate::new(0.0, 0.0)), 1000.0),
        ];
        let workers = vec![
            worker("worker_nyc", WorkerRole::CareWorker, Some("org_nyc")),
            worker("worker_open", WorkerRole::CareWorker, Some("org_open")),
            worker("worker_equator", WorkerRole::CareWorker, Some("org_equator")),
            worker("worker_unassigned", WorkerRole::CareWorker, None),
            worker("manager_nyc", WorkerRole::Manager, Some("org_nyc")),
        ];

        Self {
            store: InMemoryStore::with_directory(organizations, vec![], workers),
        }
    }

    pub fn identity(&self, worker_id: &str) -> Identity {
        resolve_identity(&self.store, Some(worker_id)).unwrap()
    }
}

pub(crate) fn organization(id: &str, center: Option<Coordinate>, radius: f64) -> Organization {
    Organization {
        id: id.to_string(),
        name: id.to_string(),
        center,
        allowed_radius_meters: radius,
        is_active: true,
    }
}

pub(crate) fn worker(id: &str, role: WorkerRole, organization_id: Option<&str>) -> Worker {
    Worker {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        name: None,
        role,
        organization_id: organization_id.map(str::to_string),
    }
}

pub(crate) fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, hour, minute, second)
        .unwrap()
}

pub(crate) fn command_at(latitude: f64, longitude: f64) -> ClockInCommand {
    ClockInCommand {
        coordinate: Coordinate::new(latitude, longitude),
        address: None,
        note: None,
    }
}

pub(crate) fn clock_out_at(latitude: f64, longitude: f64, shift_id: Option<Uuid>) -> ClockOutCommand {
    ClockOutCommand {
        shift_id,
        coordinate: Coordinate::new(latitude, longitude),
        address: None,
        note: None,
    }
}

/// A store whose active-shift lookup is stale: another request has already
/// opened a shift for `worker_id`, but this view does not see it yet.
pub(crate) struct RacingStore<'a> {
    inner: &'a InMemoryStore,
}

impl<'a> RacingStore<'a> {
    pub fn new(inner: &'a InMemoryStore, worker_id: &str) -> Self {
        inner
            .create_shift(NewShift {
                worker_id: worker_id.to_string(),
                clock_in: crate::models::ClockEvent {
                    time: at(9, 59, 59),
                    coordinate: Coordinate::new(40.7128, -74.0060),
                    address: None,
                    note: None,
                },
            })
            .unwrap();
        Self { inner }
    }
}

impl ShiftStore for RacingStore<'_> {
    fn find_worker(&self, worker_id: &str) -> Result<Option<Worker>, StoreError> {
        self.inner.find_worker(worker_id)
    }

    fn save_worker(&self, worker: Worker) -> Result<Worker, StoreError> {
        self.inner.save_worker(worker)
    }

    fn find_organization(
        &self,
        organization_id: &str,
    ) -> Result<Option<Organization>, StoreError> {
        self.inner.find_organization(organization_id)
    }

    fn save_organization(&self, organization: Organization) -> Result<Organization, StoreError> {
        self.inner.save_organization(organization)
    }

    fn save_location(&self, location: Location) -> Result<Location, StoreError> {
        self.inner.save_location(location)
    }

    fn locations_for_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Location>, StoreError> {
        self.inner.locations_for_organization(organization_id)
    }

    fn find_active_shift(&self, _worker_id: &str) -> Result<Option<Shift>, StoreError> {
        Ok(None)
    }

    fn find_shift(&self, shift_id: Uuid) -> Result<Option<Shift>, StoreError> {
        self.inner.find_shift(shift_id)
    }

    fn create_shift(&self, data: NewShift) -> Result<Shift, StoreError> {
        self.inner.create_shift(data)
    }

    fn update_shift(&self, shift_id: Uuid, data: ShiftClosure) -> Result<Shift, StoreError> {
        self.inner.update_shift(shift_id, data)
    }

    fn shifts_for_worker(&self, worker_id: &str, page: Page) -> Result<Vec<Shift>, StoreError> {
        self.inner.shifts_for_worker(worker_id, page)
    }

    fn shifts_for_organization(&self, organization_id: &str) -> Result<Vec<Shift>, StoreError> {
        self.inner.shifts_for_organization(organization_id)
    }
}
