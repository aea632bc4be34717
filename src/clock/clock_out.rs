//! Clock-out transition.
//!
//! Closes the worker's active shift and records the whole minutes worked.
//! Geofencing at clock-out is off unless the policy turns it on.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ShiftError, ShiftResult};
use crate::geofence::{GeofenceCheck, enforce_geofence};
use crate::models::{ClockEvent, Coordinate, Shift, elapsed_minutes};
use crate::store::{ShiftClosure, ShiftStore};

use super::{GeofencePolicy, Identity};

/// A validated clock-out request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockOutCommand {
    /// The shift to close. When `None`, the worker's active shift is used.
    pub shift_id: Option<Uuid>,
    /// Where the worker reports being.
    pub coordinate: Coordinate,
    /// Optional free-text address.
    pub address: Option<String>,
    /// Optional note.
    pub note: Option<String>,
}

/// The outcome of a successful clock-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockOutResult {
    /// The closed shift.
    pub shift: Shift,
    /// The geofence measurement, when a geofence was enforced.
    pub geofence: Option<GeofenceCheck>,
}

/// Clocks `identity` out at `now`.
///
/// # Errors
///
/// - [`ShiftError::NotAuthenticated`] when `identity` is `None`.
/// - [`ShiftError::InvalidCoordinate`] for an out-of-range position.
/// - [`ShiftError::ShiftNotFound`] when `shift_id` does not name an active
///   shift of this worker.
/// - [`ShiftError::NoActiveShift`] when no `shift_id` is given and the worker
///   has no active shift.
/// - [`ShiftError::OutsideAllowedArea`] when clock-out geofencing is enabled
///   and the position fails it.
/// - [`ShiftError::Store`] when the store rejects the write.
pub fn clock_out(
    store: &dyn ShiftStore,
    identity: Option<&Identity>,
    command: ClockOutCommand,
    policy: &GeofencePolicy,
    now: DateTime<Utc>,
) -> ShiftResult<ClockOutResult> {
    let identity = identity.ok_or(ShiftError::NotAuthenticated)?;
    let worker_id = identity.worker.id.as_str();
    command.coordinate.validate()?;

    let active = find_active(store, worker_id, command.shift_id).inspect_err(|err| {
        warn!(worker_id, error = %err, "Clock-out rejected");
    })?;

    let geofence = if policy.enforce_on_clock_out {
        let spec = identity.organization.as_ref().and_then(|org| org.geofence());
        enforce_geofence(&command.coordinate, spec.as_ref()).inspect_err(|err| {
            warn!(worker_id, error = %err, "Clock-out rejected: outside allowed area");
        })?
    } else {
        None
    };

    let duration_minutes = elapsed_minutes(active.clock_in.time, now);
    let shift = store.update_shift(
        active.id,
        ShiftClosure {
            clock_out: ClockEvent {
                time: now,
                coordinate: command.coordinate,
                address: command.address,
                note: command.note,
            },
            duration_minutes,
        },
    )?;

    info!(
        worker_id,
        shift_id = %shift.id,
        duration_minutes,
        "Clocked out"
    );

    Ok(ClockOutResult { shift, geofence })
}

fn find_active(
    store: &dyn ShiftStore,
    worker_id: &str,
    shift_id: Option<Uuid>,
) -> ShiftResult<Shift> {
    match shift_id {
        Some(shift_id) => store
            .find_shift(shift_id)?
            .filter(|shift| shift.worker_id == worker_id && shift.is_active())
            .ok_or(ShiftError::ShiftNotFound { shift_id }),
        None => store
            .find_active_shift(worker_id)?
            .ok_or(ShiftError::NoActiveShift),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::clock_in;
    use crate::clock::test_support::{Fixture, at, clock_out_at, command_at};
    use crate::models::ShiftStatus;
    use crate::store::Page;

    fn open_shift(fixture: &Fixture, worker_id: &str, time: DateTime<Utc>) -> Shift {
        let identity = fixture.identity(worker_id);
        let coordinate = identity
            .organization
            .as_ref()
            .and_then(|org| org.center)
            .unwrap_or(Coordinate::new(10.0, 10.0));
        clock_in(
            &fixture.store,
            Some(&identity),
            command_at(coordinate.latitude, coordinate.longitude),
            &GeofencePolicy::default(),
            time,
        )
        .unwrap()
        .shift
    }

    #[test]
    fn test_duration_is_floored_minutes() {
        let fixture = Fixture::new();
        open_shift(&fixture, "worker_nyc", at(10, 0, 0));
        let identity = fixture.identity("worker_nyc");

        let result = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, None),
            &GeofencePolicy::default(),
            at(10, 32, 15),
        )
        .unwrap();

        assert_eq!(result.shift.status, ShiftStatus::ClockedOut);
        assert_eq!(result.shift.duration_minutes, Some(32));
        assert_eq!(result.shift.clock_out.unwrap().time, at(10, 32, 15));
    }

    #[test]
    fn test_no_active_shift_leaves_store_unchanged() {
        let fixture = Fixture::new();
        let identity = fixture.identity("worker_nyc");

        let result = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, None),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );

        assert!(matches!(result, Err(ShiftError::NoActiveShift)));
        assert!(
            fixture
                .store
                .shifts_for_worker("worker_nyc", Page::default())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_explicit_shift_id_is_closed() {
        let fixture = Fixture::new();
        let shift = open_shift(&fixture, "worker_nyc", at(9, 0, 0));
        let identity = fixture.identity("worker_nyc");

        let result = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, Some(shift.id)),
            &GeofencePolicy::default(),
            at(17, 0, 0),
        )
        .unwrap();

        assert_eq!(result.shift.id, shift.id);
        assert_eq!(result.shift.duration_minutes, Some(480));
    }

    #[test]
    fn test_shift_id_of_another_worker_is_not_found() {
        let fixture = Fixture::new();
        let other = open_shift(&fixture, "worker_open", at(9, 0, 0));
        open_shift(&fixture, "worker_nyc", at(9, 0, 0));
        let identity = fixture.identity("worker_nyc");

        let result = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, Some(other.id)),
            &GeofencePolicy::default(),
            at(17, 0, 0),
        );

        match result {
            Err(ShiftError::ShiftNotFound { shift_id }) => assert_eq!(shift_id, other.id),
            other => panic!("Expected ShiftNotFound, got {:?}", other),
        }
        assert!(fixture.store.find_active_shift("worker_open").unwrap().is_some());
    }

    #[test]
    fn test_closed_shift_id_is_not_found() {
        let fixture = Fixture::new();
        let shift = open_shift(&fixture, "worker_nyc", at(9, 0, 0));
        let identity = fixture.identity("worker_nyc");
        let policy = GeofencePolicy::default();

        clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, Some(shift.id)),
            &policy,
            at(12, 0, 0),
        )
        .unwrap();

        let again = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, Some(shift.id)),
            &policy,
            at(13, 0, 0),
        );
        assert!(matches!(again, Err(ShiftError::ShiftNotFound { .. })));
    }

    #[test]
    fn test_clock_out_is_not_geofenced_by_default() {
        let fixture = Fixture::new();
        open_shift(&fixture, "worker_nyc", at(9, 0, 0));
        let identity = fixture.identity("worker_nyc");

        let result = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(-33.8688, 151.2093, None),
            &GeofencePolicy::default(),
            at(17, 0, 0),
        )
        .unwrap();
        assert!(result.geofence.is_none());
    }

    #[test]
    fn test_clock_out_geofence_when_enabled() {
        let fixture = Fixture::new();
        open_shift(&fixture, "worker_nyc", at(9, 0, 0));
        let identity = fixture.identity("worker_nyc");
        let policy = GeofencePolicy {
            enforce_on_clock_in: true,
            enforce_on_clock_out: true,
        };

        let outside = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7182, -74.0060, None),
            &policy,
            at(17, 0, 0),
        );
        assert!(matches!(outside, Err(ShiftError::OutsideAllowedArea { .. })));
        assert!(fixture.store.find_active_shift("worker_nyc").unwrap().is_some());

        let inside = clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, None),
            &policy,
            at(17, 0, 0),
        )
        .unwrap();
        assert!(inside.geofence.unwrap().within);
    }

    #[test]
    fn test_clock_in_allowed_again_after_clock_out() {
        let fixture = Fixture::new();
        open_shift(&fixture, "worker_nyc", at(8, 0, 0));
        let identity = fixture.identity("worker_nyc");

        clock_out(
            &fixture.store,
            Some(&identity),
            clock_out_at(40.7128, -74.0060, None),
            &GeofencePolicy::default(),
            at(12, 0, 0),
        )
        .unwrap();

        let next = open_shift(&fixture, "worker_nyc", at(13, 0, 0));
        assert!(next.is_active());
        let history = fixture
            .store
            .shifts_for_worker("worker_nyc", Page::default())
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_missing_identity_is_not_authenticated() {
        let fixture = Fixture::new();
        let result = clock_out(
            &fixture.store,
            None,
            clock_out_at(0.0, 0.0, None),
            &GeofencePolicy::default(),
            at(10, 0, 0),
        );
        assert!(matches!(result, Err(ShiftError::NotAuthenticated)));
    }
}
