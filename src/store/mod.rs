//! Persistence boundary for the shift tracker.
//!
//! The clock guard and the reporting queries talk to storage only through
//! the [`ShiftStore`] trait. Implementations own atomicity: in particular
//! [`ShiftStore::create_shift`] must reject a second active shift for the
//! same worker even when two clock-ins race.

mod memory;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{ClockEvent, Location, Organization, Shift, Worker};

pub use memory::InMemoryStore;

/// Default number of shifts returned by a history query.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Data for a shift being opened at clock-in.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShift {
    /// The worker clocking in.
    pub worker_id: String,
    /// The clock-in event.
    pub clock_in: ClockEvent,
}

/// Data written to a shift at clock-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftClosure {
    /// The clock-out event.
    pub clock_out: ClockEvent,
    /// Whole minutes worked.
    pub duration_minutes: i64,
}

/// A window over a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Maximum number of items.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of items to skip.
    #[serde(default)]
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

/// Storage operations needed by the shift tracker.
///
/// Listing methods return shifts newest clock-in first.
pub trait ShiftStore: Send + Sync {
    /// Looks up a worker by id.
    fn find_worker(&self, worker_id: &str) -> Result<Option<Worker>, StoreError>;

    /// Inserts or replaces a worker record.
    fn save_worker(&self, worker: Worker) -> Result<Worker, StoreError>;

    /// Looks up an organization by id.
    fn find_organization(&self, organization_id: &str)
    -> Result<Option<Organization>, StoreError>;

    /// Inserts or replaces an organization record.
    fn save_organization(&self, organization: Organization) -> Result<Organization, StoreError>;

    /// Inserts or replaces a location record.
    fn save_location(&self, location: Location) -> Result<Location, StoreError>;

    /// Lists all locations of an organization, active or not.
    fn locations_for_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Location>, StoreError>;

    /// Returns the worker's clocked-in shift, if any.
    fn find_active_shift(&self, worker_id: &str) -> Result<Option<Shift>, StoreError>;

    /// Looks up a shift by id.
    fn find_shift(&self, shift_id: Uuid) -> Result<Option<Shift>, StoreError>;

    /// Opens a shift in the clocked-in state.
    ///
    /// Fails with [`StoreError::DuplicateActiveShift`] if the worker already
    /// has one. The check and the insert are a single atomic step.
    fn create_shift(&self, data: NewShift) -> Result<Shift, StoreError>;

    /// Clocks out a shift.
    ///
    /// Fails with [`StoreError::ShiftClosed`] if the shift is no longer
    /// clocked in, so a shift can never be closed twice.
    fn update_shift(&self, shift_id: Uuid, data: ShiftClosure) -> Result<Shift, StoreError>;

    /// Lists one worker's shifts.
    fn shifts_for_worker(&self, worker_id: &str, page: Page) -> Result<Vec<Shift>, StoreError>;

    /// Lists the shifts of every worker currently assigned to an organization.
    fn shifts_for_organization(&self, organization_id: &str) -> Result<Vec<Shift>, StoreError>;
}
