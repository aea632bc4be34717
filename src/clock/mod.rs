//! Shift state guard.
//!
//! This module enforces the two-state shift lifecycle: a worker clocks in
//! (subject to organization membership, the single-active-shift rule, and
//! the geofence) and later clocks out of that shift. `ClockedOut` is
//! terminal; the next clock-in opens a new shift.
//!
//! The caller's [`Identity`] and the current time are passed in explicitly.

mod clock_in;
mod clock_out;
mod identity;
mod policy;
#[cfg(test)]
mod test_support;

pub use clock_in::{ClockInCommand, ClockInResult, clock_in};
pub use clock_out::{ClockOutCommand, ClockOutResult, clock_out};
pub use identity::{Identity, resolve_identity};
pub use policy::GeofencePolicy;
