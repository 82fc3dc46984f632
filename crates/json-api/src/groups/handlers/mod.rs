//! Group Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod update;

use std::num::NonZeroU32;

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobsender_app::domain::{
    groups::records::GroupRecord,
    schedules::{
        Recurrence, Schedule, ScheduleValidationError,
        records::{parse_date, parse_time_of_day},
    },
};

/// Recurring request schedule as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ScheduleBody {
    /// `weeks` or `months`
    pub interval_type: String,

    /// Day of week for weekly schedules, e.g. `Friday`
    #[serde(default)]
    pub weekday: Option<String>,

    /// Day of month for monthly schedules, 1 to 31
    #[serde(default)]
    pub monthday: Option<i64>,

    /// Fire every this many weeks or months
    pub interval: u32,

    /// IANA time zone, e.g. `Europe/London`
    pub timezone: String,

    /// Local time of day as `HH:MM`
    pub time: String,

    /// First day of the schedule as `YYYY-MM-DD`
    pub start_date: String,

    /// Last day of the schedule as `YYYY-MM-DD`
    pub end_date: String,
}

impl TryFrom<ScheduleBody> for Schedule {
    type Error = ScheduleValidationError;

    fn try_from(body: ScheduleBody) -> Result<Self, Self::Error> {
        let schedule = Schedule {
            recurrence: Recurrence::from_parts(
                &body.interval_type,
                body.weekday.as_deref(),
                body.monthday,
            )?,
            interval: NonZeroU32::new(body.interval).ok_or(ScheduleValidationError::Interval)?,
            timezone: body.timezone,
            time_of_day: parse_time_of_day(&body.time)?,
            start_date: parse_date(&body.start_date)?,
            end_date: parse_date(&body.end_date)?,
        };

        schedule.validate()?;

        Ok(schedule)
    }
}

impl From<&Schedule> for ScheduleBody {
    fn from(schedule: &Schedule) -> Self {
        ScheduleBody {
            interval_type: schedule.recurrence.interval_type().to_string(),
            weekday: schedule.recurrence.weekday().map(|day| day.to_string()),
            monthday: schedule.recurrence.monthday().map(i64::from),
            interval: schedule.interval.get(),
            timezone: schedule.timezone.clone(),
            time: schedule.time_of_day.strftime("%H:%M").to_string(),
            start_date: schedule.start_date.to_string(),
            end_date: schedule.end_date.to_string(),
        }
    }
}

/// Group name and schedule, used to create and replace a group.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct GroupRequest {
    pub name: String,
    pub schedule: ScheduleBody,
}

impl GroupRequest {
    /// Validate the request into a name and schedule.
    pub(crate) fn into_parts(self) -> Result<(String, Schedule), StatusError> {
        let schedule = Schedule::try_from(self.schedule)
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        Ok((self.name, schedule))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GroupResponse {
    pub uuid: Uuid,
    pub owner_id: String,
    pub name: String,
    pub schedule: ScheduleBody,

    /// Cron expression the scheduler job fires on
    pub cron: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<GroupRecord> for GroupResponse {
    fn from(group: GroupRecord) -> Self {
        GroupResponse {
            uuid: group.uuid.into(),
            owner_id: group.owner_id.to_string(),
            schedule: ScheduleBody::from(&group.schedule),
            cron: group.schedule.cron_expression(),
            name: group.name,
            created_at: group.created_at.to_string(),
            updated_at: group.updated_at.to_string(),
        }
    }
}
