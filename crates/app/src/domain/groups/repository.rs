//! Groups Repository

use std::num::NonZeroU32;

use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime, Timestamp as SqlxTimestamp};
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query, query_as,
    query::QueryAs,
};
use uuid::Uuid;

use crate::domain::{
    groups::{
        data::{GroupUpdate, NewGroup},
        records::{GroupRecord, GroupUuid},
    },
    owners::records::OwnerId,
    schedules::{Recurrence, Schedule},
};

const GET_GROUP_SQL: &str = include_str!("sql/get_group.sql");
const CREATE_GROUP_SQL: &str = include_str!("sql/create_group.sql");
const UPDATE_GROUP_SQL: &str = include_str!("sql/update_group.sql");
const ASSIGN_OWNER_GROUP_SQL: &str = include_str!("sql/assign_owner_group.sql");
const DELETE_GROUP_SQL: &str = include_str!("sql/delete_group.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGroupsRepository;

impl PgGroupsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: GroupUuid,
    ) -> Result<GroupRecord, sqlx::Error> {
        query_as::<Postgres, GroupRecord>(GET_GROUP_SQL)
            .bind(group.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: &NewGroup,
    ) -> Result<GroupRecord, sqlx::Error> {
        let statement = query_as::<Postgres, GroupRecord>(CREATE_GROUP_SQL)
            .bind(group.uuid.into_uuid())
            .bind(group.owner_id.as_str())
            .bind(&group.name);

        bind_schedule(statement, &group.schedule)?
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn assign_owner_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerId,
        group: GroupUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ASSIGN_OWNER_GROUP_SQL)
            .bind(owner.as_str())
            .bind(group.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: GroupUuid,
        update: &GroupUpdate,
    ) -> Result<GroupRecord, sqlx::Error> {
        let statement = query_as::<Postgres, GroupRecord>(UPDATE_GROUP_SQL)
            .bind(group.into_uuid())
            .bind(&update.name);

        bind_schedule(statement, &update.schedule)?
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_group(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: GroupUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_GROUP_SQL)
            .bind(group.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn bind_schedule<'q>(
    statement: QueryAs<'q, Postgres, GroupRecord, PgArguments>,
    schedule: &'q Schedule,
) -> Result<QueryAs<'q, Postgres, GroupRecord, PgArguments>, sqlx::Error> {
    let interval =
        i32::try_from(schedule.interval.get()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    Ok(statement
        .bind(schedule.recurrence.interval_type())
        .bind(schedule.recurrence.weekday().map(|day| day.as_str()))
        .bind(schedule.recurrence.monthday().map(i16::from))
        .bind(interval)
        .bind(&schedule.timezone)
        .bind(SqlxTime::from(schedule.time_of_day))
        .bind(SqlxDate::from(schedule.start_date))
        .bind(SqlxDate::from(schedule.end_date)))
}

fn column_error(index: &str, source: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for GroupRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let interval_type: String = row.try_get("interval_type")?;
        let weekday: Option<String> = row.try_get("weekday")?;
        let monthday: Option<i16> = row.try_get("monthday")?;

        let recurrence = Recurrence::from_parts(
            &interval_type,
            weekday.as_deref(),
            monthday.map(i64::from),
        )
        .map_err(|e| column_error("interval_type", e))?;

        let interval = u32::try_from(row.try_get::<i32, _>("interval_count")?)
            .map_err(|e| column_error("interval_count", e))?;

        let interval = NonZeroU32::new(interval).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "interval_count".to_string(),
            source: "interval must be positive".into(),
        })?;

        Ok(Self {
            uuid: GroupUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            owner_id: OwnerId::new(row.try_get::<String, _>("owner_id")?),
            name: row.try_get("name")?,
            schedule: Schedule {
                recurrence,
                interval,
                timezone: row.try_get("timezone")?,
                time_of_day: row.try_get::<SqlxTime, _>("time_of_day")?.to_jiff(),
                start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
                end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
