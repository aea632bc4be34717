//! Clock-in transition.
//!
//! Opens a new [`ShiftStatus::ClockedIn`](crate::models::ShiftStatus) shift
//! after checking, in order: the caller is known, the caller belongs to an
//! organization, the caller has no active shift, and the reported position
//! lies inside the organization's geofence (when one is configured).

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{ShiftError, ShiftResult};
use crate::geofence::{GeofenceCheck, enforce_geofence};
use crate::models::{ClockEvent, Coordinate, Shift};
use crate::store::{NewShift, ShiftStore};

use super::{GeofencePolicy, Identity};

/// A validated clock-in request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockInCommand {
    /// Where the worker reports being.
    pub coordinate: Coordinate,
    /// Optional free-text address.
    pub address: Option<String>,
    /// Optional note.
    pub note: Option<String>,
}

/// The outcome of a successful clock-in.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockInResult {
    /// The newly opened shift.
    pub shift: Shift,
    /// The geofence measurement, when a geofence was enforced.
    pub geofence: Option<GeofenceCheck>,
}

/// Clocks `identity` in at `now`.
///
/// # Errors
///
/// - [`ShiftError::NotAuthenticated`] when `identity` is `None`.
/// - [`ShiftError::InvalidCoordinate`] for an out-of-range position.
/// - [`ShiftError::NoOrganization`] when the worker has no organization.
/// - [`ShiftError::AlreadyClockedIn`] when the worker has an active shift.
/// - [`ShiftError::OutsideAllowedArea`] when the position fails the geofence.
/// - [`ShiftError::Store`] when the store rejects the write, including a
///   concurrent clock-in that won the race.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use shift_tracker::clock::{clock_in, resolve_identity, ClockInCommand, GeofencePolicy};
/// use shift_tracker::models::{Coordinate, Organization, Worker, WorkerRole};
/// use shift_tracker::store::InMemoryStore;
///
/// let store = InMemoryStore::with_directory(
///     vec![Organization {
///         id: "org_1".to_string(),
///         name: "Harbour View Care".to_string(),
///         center: Some(Coordinate::new(40.7128, -74.0060)),
///         allowed_radius_meters: 500.0,
///         is_active: true,
///     }],
///     vec![],
///     vec![Worker {
///         id: "w1".to_string(),
///         email: "w1@example.com".to_string(),
///         name: None,
///         role: WorkerRole::CareWorker,
///         organization_id: Some("org_1".to_string()),
///     }],
/// );
///
/// let identity = resolve_identity(&store, Some("w1")).unwrap();
/// let command = ClockInCommand {
///     coordinate: Coordinate::new(40.7128, -74.0060),
///     address: None,
///     note: None,
/// };
/// let result = clock_in(&store, Some(&identity), command, &GeofencePolicy::default(), Utc::now()).unwrap();
/// assert!(result.shift.is_active());
/// ```
pub fn clock_in(
    store: &dyn ShiftStore,
    identity: Option<&Identity>,
    command: ClockInCommand,
    policy: &GeofencePolicy,
    now: DateTime<Utc>,
) -> ShiftResult<ClockInResult> {
    let identity = identity.ok_or(ShiftError::NotAuthenticated)?;
    let worker_id = identity.worker.id.as_str();
    command.coordinate.validate()?;

    let organization = identity
        .organization
        .as_ref()
        .ok_or(ShiftError::NoOrganization)?;

    if store.find_active_shift(worker_id)?.is_some() {
        warn!(worker_id, "Clock-in rejected: already clocked in");
        return Err(ShiftError::AlreadyClockedIn);
    }

    let geofence = if policy.enforce_on_clock_in {
        enforce_geofence(&command.coordinate, organization.geofence().as_ref()).inspect_err(
            |err| {
                warn!(
                    worker_id,
                    organization_id = %organization.id,
                    error = %err,
                    "Clock-in rejected: outside allowed area"
                )
            },
        )?
    } else {
        None
    };

    let shift = store.create_shift(NewShift {
        worker_id: worker_id.to_string(),
        clock_in: ClockEvent {
            time: now,
            coordinate: command.coordinate,
            address: command.address,
            note: command.note,
        },
    })?;

    info!(
        worker_id,
        shift_id = %shift.id,
        organization_id = %organization.id,
        distance_m = geofence.map(|g| g.distance_meters),
        "Clocked in"
    );

    Ok(ClockInResult { shift, geofence })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_support::{Fixture, at, command_at};
    use crate::error::StoreError;
    use crate::models::ShiftStatus;

    #[test]
    fn test_clock_in_at_center_succeeds() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_nyc");

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(40.7128, -74.0060),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        )
        .unwrap();

        assert_eq!(result.shift.status, ShiftStatus::ClockedIn);
        assert_eq!(result.shift.worker_id, "worker_nyc");
        assert_eq!(result.shift.clock_in.time, at(10, 0, 0));
        assert_eq!(result.geofence.unwrap().distance_meters, 0.0);
    }

    #[test]
    fn test_clock_in_600m_away_is_outside_allowed_area() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_nyc");

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(40.7182, -74.0060),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );

        assert!(matches!(result, Err(ShiftError::OutsideAllowedArea { .. })));
        assert!(fixture.store.find_active_shift("worker_nyc").unwrap().is_none());
    }

    #[test]
    fn test_clock_in_twice_fails_second_time() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_nyc");
        let policy = GeofencePolicy::default();

        clock_in(
            &fixture.store,
            Some(&identity),
            command_at(40.7128, -74.0060),
            &policy,
            at(10, 0, 0),
        )
        .unwrap();

        let second = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(40.7128, -74.0060),
            &policy,
            at(10, 5, 0),
        );
        assert!(matches!(second, Err(ShiftError::AlreadyClockedIn)));
    }

    #[test]
    fn test_no_center_permits_clock_in_anywhere() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_open");

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(-33.8688, 151.2093),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        )
        .unwrap();

        assert!(result.geofence.is_none());
        assert!(result.shift.is_active());
    }

    #[test]
    fn test_zero_latitude_center_is_still_enforced() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_equator");

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(1.0, 0.0),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );
        assert!(matches!(result, Err(ShiftError::OutsideAllowedArea { .. })));
    }

    #[test]
    fn test_policy_can_disable_clock_in_geofence() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_nyc");
        let policy = GeofencePolicy {
            enforce_on_clock_in: false,
            enforce_on_clock_out: false,
        };

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(40.7182, -74.0060),
            &policy,
            at(10, 0, 0),
        )
        .unwrap();
        assert!(result.geofence.is_none());
    }

    #[test]
    fn test_missing_identity_is_not_authenticated() {
        let fixture = Fixture::new();
        let result = clock_in(
            &fixture.store,
            None,
            command_at(40.7128, -74.0060),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );
        assert!(matches!(result, Err(ShiftError::NotAuthenticated)));
    }

    #[test]
    fn test_worker_without_organization() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_unassigned");

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(40.7128, -74.0060),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );
        assert!(matches!(result, Err(ShiftError::NoOrganization)));
    }

    #[test]
    fn test_invalid_coordinate_rejected_before_any_write() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_open");

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command_at(120.0, 0.0),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );
        assert!(matches!(result, Err(ShiftError::InvalidCoordinate { .. })));
        assert!(fixture.store.find_active_shift("worker_open").unwrap().is_none());
    }

    #[test]
    fn test_records_address_and_note() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_nyc");
        let mut command = command_at(40.7128, -74.0060);
        command.address = Some("1 Centre St".to_string());
        command.note = Some("Covering for Alex".to_string());

        let result = clock_in(
            &fixture.store,
            Some(&identity),
            command,
            &GeofencePolicy::default(),
            at(10, 0, 0),
        )
        .unwrap();

        assert_eq!(result.shift.clock_in.address.as_deref(), Some("1 Centre St"));
        assert_eq!(result.shift.clock_in.note.as_deref(), Some("Covering for Alex"));
    }

    #[test]
    fn test_store_rejection_propagates_unchanged() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_nyc");

        // Another request opened a shift between our check and our write.
        let stale_store = crate::clock::test_support::RacingStore::new(&fixture.store, "worker_nyc");
        let result = clock_in(
            &stale_store,
            Some(&identity),
            command_at(40.7128, -74.0060),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );

        assert!(matches!(
            result,
            Err(ShiftError::Store(StoreError::DuplicateActiveShift { .. }))
        ));
    }
}
