//! Schedule Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::NonZeroU32,
    str::FromStr,
};

use jiff::{
    civil::{Date, Time},
    tz::TimeZone,
};
use serde::{Deserialize, Serialize};

use crate::domain::schedules::errors::ScheduleValidationError;

/// Day of the week a weekly schedule fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Cron day-of-week number, Sunday is 0.
    #[must_use]
    pub const fn cron_index(self) -> u8 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ScheduleValidationError::Weekday(value.to_string()))
    }
}

/// Which calendar unit the schedule counts in, with the day it fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Weeks { weekday: Weekday },
    Months { monthday: u8 },
}

impl Recurrence {
    pub const WEEKS: &'static str = "weeks";
    pub const MONTHS: &'static str = "months";

    #[must_use]
    pub const fn interval_type(self) -> &'static str {
        match self {
            Recurrence::Weeks { .. } => Self::WEEKS,
            Recurrence::Months { .. } => Self::MONTHS,
        }
    }

    #[must_use]
    pub const fn weekday(self) -> Option<Weekday> {
        match self {
            Recurrence::Weeks { weekday } => Some(weekday),
            Recurrence::Months { .. } => None,
        }
    }

    #[must_use]
    pub const fn monthday(self) -> Option<u8> {
        match self {
            Recurrence::Weeks { .. } => None,
            Recurrence::Months { monthday } => Some(monthday),
        }
    }

    /// Build a recurrence from its stored columns.
    ///
    /// # Errors
    ///
    /// Returns an error when the interval type is unknown or its day field is missing.
    pub fn from_parts(
        interval_type: &str,
        weekday: Option<&str>,
        monthday: Option<i64>,
    ) -> Result<Self, ScheduleValidationError> {
        match interval_type.trim().to_ascii_lowercase().as_str() {
            Self::WEEKS => {
                let weekday = weekday
                    .ok_or_else(|| ScheduleValidationError::Weekday(String::new()))?
                    .parse()?;

                Ok(Recurrence::Weeks { weekday })
            }
            Self::MONTHS => {
                let monthday = monthday
                    .and_then(|day| u8::try_from(day).ok())
                    .filter(|day| (1..=31).contains(day))
                    .ok_or(ScheduleValidationError::Monthday)?;

                Ok(Recurrence::Months { monthday })
            }
            other => Err(ScheduleValidationError::IntervalType(other.to_string())),
        }
    }
}

/// Recurring request schedule of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub recurrence: Recurrence,
    pub interval: NonZeroU32,
    pub timezone: String,
    pub time_of_day: Time,
    pub start_date: Date,
    pub end_date: Date,
}

impl Schedule {
    /// Check the cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns an error when the date range is inverted or the time zone is unknown.
    pub fn validate(&self) -> Result<(), ScheduleValidationError> {
        if self.start_date > self.end_date {
            return Err(ScheduleValidationError::DateRange);
        }

        if TimeZone::get(&self.timezone).is_err() {
            return Err(ScheduleValidationError::TimeZone(self.timezone.clone()));
        }

        Ok(())
    }
}

/// Parse a `HH:MM` 24 hour time of day.
///
/// # Errors
///
/// Returns an error when the value is not a valid time of day.
pub fn parse_time_of_day(value: &str) -> Result<Time, ScheduleValidationError> {
    let (hour, minute) = value
        .trim()
        .split_once(':')
        .ok_or(ScheduleValidationError::TimeOfDay)?;

    let hour = hour
        .parse::<i8>()
        .map_err(|_error| ScheduleValidationError::TimeOfDay)?;
    let minute = minute
        .parse::<i8>()
        .map_err(|_error| ScheduleValidationError::TimeOfDay)?;

    Time::new(hour, minute, 0, 0).map_err(|_error| ScheduleValidationError::TimeOfDay)
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns an error when the value is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, ScheduleValidationError> {
    value
        .trim()
        .parse::<Date>()
        .map_err(|_error| ScheduleValidationError::Date(value.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::civil::{date, time};

    use super::*;

    pub(crate) fn weekly(interval: u32) -> Schedule {
        Schedule {
            recurrence: Recurrence::Weeks {
                weekday: Weekday::Monday,
            },
            interval: NonZeroU32::new(interval).unwrap_or(NonZeroU32::MIN),
            timezone: "UTC".to_string(),
            time_of_day: time(9, 0, 0, 0),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        }
    }

    #[test]
    fn weekday_parses_case_insensitively() {
        assert_eq!("friday".parse::<Weekday>(), Ok(Weekday::Friday));
        assert_eq!(" Sunday ".parse::<Weekday>(), Ok(Weekday::Sunday));
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn recurrence_requires_matching_day_field() {
        assert_eq!(
            Recurrence::from_parts("weeks", Some("Tuesday"), None),
            Ok(Recurrence::Weeks {
                weekday: Weekday::Tuesday
            })
        );
        assert_eq!(
            Recurrence::from_parts("months", None, Some(31)),
            Ok(Recurrence::Months { monthday: 31 })
        );
        assert_eq!(
            Recurrence::from_parts("months", None, Some(32)),
            Err(ScheduleValidationError::Monthday)
        );
        assert!(Recurrence::from_parts("weeks", None, Some(3)).is_err());
        assert!(Recurrence::from_parts("days", Some("Monday"), None).is_err());
    }

    #[test]
    fn time_of_day_rejects_out_of_range_values() {
        assert_eq!(parse_time_of_day("09:30"), Ok(time(9, 30, 0, 0)));
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("0930").is_err());
    }

    #[test]
    fn validate_rejects_inverted_dates_and_unknown_zones() {
        let mut schedule = weekly(1);

        assert_eq!(schedule.validate(), Ok(()));

        schedule.start_date = date(2025, 1, 1);
        assert_eq!(schedule.validate(), Err(ScheduleValidationError::DateRange));

        schedule = weekly(1);
        schedule.timezone = "Mars/Olympus".to_string();
        assert!(matches!(
            schedule.validate(),
            Err(ScheduleValidationError::TimeZone(_))
        ));
    }
}
