//! Timesheets Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    contractors::records::ContractorUuid,
    groups::records::GroupUuid,
    schedules::RequestId,
    timesheets::{
        data::NewTimesheet,
        records::{TimesheetRecord, TimesheetUuid},
    },
};

const LIST_GROUP_TIMESHEETS_SQL: &str = include_str!("sql/list_group_timesheets.sql");
const LIST_CONTRACTOR_TIMESHEETS_SQL: &str = include_str!("sql/list_contractor_timesheets.sql");
const RECORD_TIMESHEET_SQL: &str = include_str!("sql/record_timesheet.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTimesheetsRepository;

impl PgTimesheetsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_group_timesheets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: GroupUuid,
    ) -> Result<Vec<TimesheetRecord>, sqlx::Error> {
        query_as::<Postgres, TimesheetRecord>(LIST_GROUP_TIMESHEETS_SQL)
            .bind(group.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_contractor_timesheets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contractor: ContractorUuid,
    ) -> Result<Vec<TimesheetRecord>, sqlx::Error> {
        query_as::<Postgres, TimesheetRecord>(LIST_CONTRACTOR_TIMESHEETS_SQL)
            .bind(contractor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn record_timesheet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        timesheet: &NewTimesheet,
    ) -> Result<TimesheetRecord, sqlx::Error> {
        query_as::<Postgres, TimesheetRecord>(RECORD_TIMESHEET_SQL)
            .bind(timesheet.uuid.into_uuid())
            .bind(timesheet.contractor_uuid.into_uuid())
            .bind(timesheet.request_id.as_str())
            .bind(&timesheet.storage_url)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TimesheetRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TimesheetUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            contractor_uuid: ContractorUuid::from_uuid(row.try_get::<Uuid, _>("contractor_uuid")?),
            request_id: RequestId::new(row.try_get::<String, _>("request_id")?),
            storage_url: row.try_get("storage_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
