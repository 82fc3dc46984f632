//! Schedule evaluation.

use jiff::{Timestamp, tz::TimeZone};

use crate::domain::schedules::{
    errors::{NotDue, ScheduleError},
    period::PeriodId,
    records::{Recurrence, Schedule},
};

/// Decide whether `schedule` fires at `now` and name the period it fires for.
///
/// Start and end dates are compared against the local date in the schedule's
/// time zone and are both inclusive. Periodicity is calendar absolute: a
/// schedule with interval `n` fires in ISO weeks (or months) divisible by `n`.
///
/// # Errors
///
/// Returns [`ScheduleError::NotDue`] when the instant is outside the schedule,
/// or [`ScheduleError::UnknownTimeZone`] when the time zone cannot be resolved.
pub fn evaluate(schedule: &Schedule, now: Timestamp) -> Result<PeriodId, ScheduleError> {
    let tz = TimeZone::get(&schedule.timezone)
        .map_err(|_error| ScheduleError::UnknownTimeZone(schedule.timezone.clone()))?;

    let today = now.to_zoned(tz).date();

    if today < schedule.start_date {
        return Err(NotDue::BeforeStart.into());
    }

    if today > schedule.end_date {
        return Err(NotDue::AfterEnd.into());
    }

    let number = match schedule.recurrence {
        Recurrence::Weeks { .. } => u32::from(today.iso_week_date().week().unsigned_abs()),
        Recurrence::Months { .. } => u32::from(today.month().unsigned_abs()),
    };

    if number % schedule.interval.get() != 0 {
        return Err(NotDue::OffInterval.into());
    }

    Ok(PeriodId::new(number, today.year()))
}
