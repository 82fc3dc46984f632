//! Cron expressions for the external scheduler.

use crate::domain::schedules::records::{Recurrence, Schedule};

impl Schedule {
    /// Unix cron expression firing at the schedule's time of day.
    ///
    /// Weekly schedules fire on their weekday and monthly schedules on their
    /// day of month; the interval is applied when the schedule is evaluated.
    #[must_use]
    pub fn cron_expression(&self) -> String {
        let minute = self.time_of_day.minute();
        let hour = self.time_of_day.hour();

        match self.recurrence {
            Recurrence::Weeks { weekday } => {
                format!("{minute} {hour} * * {}", weekday.cron_index())
            }
            Recurrence::Months { monthday } => format!("{minute} {hour} {monthday} * *"),
        }
    }
}
