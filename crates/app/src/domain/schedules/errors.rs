//! Schedule errors.

use thiserror::Error;

/// Reasons a schedule does not fire at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotDue {
    #[error("the schedule has not started yet")]
    BeforeStart,

    #[error("the schedule has already ended")]
    AfterEnd,

    #[error("the current period is not on the schedule interval")]
    OffInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule not due: {0}")]
    NotDue(#[from] NotDue),

    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleValidationError {
    #[error("unknown interval type {0:?}")]
    IntervalType(String),

    #[error("unknown weekday {0:?}")]
    Weekday(String),

    #[error("day of month must be between 1 and 31")]
    Monthday,

    #[error("interval must be a positive integer")]
    Interval,

    #[error("time of day must be formatted as HH:MM")]
    TimeOfDay,

    #[error("invalid date {0:?}")]
    Date(String),

    #[error("start date is after end date")]
    DateRange,

    #[error("unknown time zone {0:?}")]
    TimeZone(String),
}
