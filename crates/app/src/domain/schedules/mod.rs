//! Schedules
//!
//! Pure evaluation of a group's recurring request schedule.

mod cron;
pub mod errors;
mod evaluator;
pub mod period;
pub mod records;

pub use errors::{NotDue, ScheduleError, ScheduleValidationError};
pub use evaluator::evaluate;
pub use period::{PeriodId, RequestId};
pub use records::{Recurrence, Schedule, Weekday};
