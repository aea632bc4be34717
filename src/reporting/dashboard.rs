//! Manager staffing dashboard.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::clock::Identity;
use crate::error::{ShiftError, ShiftResult};
use crate::models::{DashboardStats, ShiftStatus, WeeklyHours};
use crate::store::ShiftStore;

/// Returns midnight UTC of the day containing `now`.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Returns midnight UTC of the Sunday starting the week containing `now`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use shift_tracker::reporting::start_of_week;
///
/// // 2026-01-15 is a Thursday; its week began on Sunday 2026-01-11.
/// let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
/// assert_eq!(start_of_week(now), Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap());
/// ```
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_sunday = i64::from(now.weekday().num_days_from_sunday());
    start_of_day(now) - Duration::days(days_since_sunday)
}

/// Builds the staffing dashboard of `organization_id` as of `now`.
///
/// Weekly hours count only clocked-out shifts that started this week.
/// Manager only.
pub fn dashboard_stats(
    store: &dyn ShiftStore,
    identity: &Identity,
    organization_id: &str,
    now: DateTime<Utc>,
) -> ShiftResult<DashboardStats> {
    identity.require_manager("view the dashboard")?;
    if store.find_organization(organization_id)?.is_none() {
        return Err(ShiftError::OrganizationNotFound {
            organization_id: organization_id.to_string(),
        });
    }

    let today = start_of_day(now);
    let week_start = start_of_week(now);
    let shifts = store.shifts_for_organization(organization_id)?;

    let total_staff_clocked_in = shifts.iter().filter(|s| s.is_active()).count();
    let total_clocked_in_today = shifts.iter().filter(|s| s.clock_in.time >= today).count();

    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for shift in shifts
        .iter()
        .filter(|s| s.status == ShiftStatus::ClockedOut && s.clock_in.time >= week_start)
    {
        let hours = shift.worked_hours().unwrap_or(Decimal::ZERO);
        match totals.iter_mut().find(|(id, _)| *id == shift.worker_id) {
            Some((_, total)) => *total += hours,
            None => totals.push((shift.worker_id.clone(), hours)),
        }
    }

    let total_hours: Decimal = totals.iter().map(|(_, hours)| *hours).sum();
    let average_hours_per_day = (total_hours / Decimal::new(7, 0)).round_dp(2);

    let weekly_hours_by_staff = totals
        .into_iter()
        .map(|(worker_id, hours)| {
            let worker_name = store
                .find_worker(&worker_id)?
                .map(|w| w.display_name().to_string())
                .unwrap_or_else(|| worker_id.clone());
            Ok(WeeklyHours {
                worker_id,
                worker_name,
                total_hours: hours.round_dp(2),
            })
        })
        .collect::<ShiftResult<Vec<_>>>()?;

    Ok(DashboardStats {
        organization_id: organization_id.to_string(),
        total_staff_clocked_in,
        total_clocked_in_today,
        average_hours_per_day,
        weekly_hours_by_staff,
    })
}
