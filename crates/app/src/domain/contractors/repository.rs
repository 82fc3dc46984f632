//! Contractors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json,
};
use uuid::Uuid;

use crate::domain::{
    contractors::{
        data::{ContractorUpdate, NewContractor},
        records::{ContractorRecord, ContractorUuid, LastRequest},
    },
    groups::records::GroupUuid,
};

const LIST_CONTRACTORS_SQL: &str = include_str!("sql/list_contractors.sql");
const GET_CONTRACTOR_SQL: &str = include_str!("sql/get_contractor.sql");
const LOCK_CONTRACTOR_SQL: &str = include_str!("sql/lock_contractor.sql");
const CREATE_CONTRACTOR_SQL: &str = include_str!("sql/create_contractor.sql");
const UPDATE_CONTRACTOR_SQL: &str = include_str!("sql/update_contractor.sql");
const SAVE_REQUEST_STATE_SQL: &str = include_str!("sql/save_request_state.sql");
const DELETE_CONTRACTOR_SQL: &str = include_str!("sql/delete_contractor.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgContractorsRepository;

impl PgContractorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_contractors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        group: GroupUuid,
    ) -> Result<Vec<ContractorRecord>, sqlx::Error> {
        query_as::<Postgres, ContractorRecord>(LIST_CONTRACTORS_SQL)
            .bind(group.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_contractor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contractor: ContractorUuid,
    ) -> Result<ContractorRecord, sqlx::Error> {
        query_as::<Postgres, ContractorRecord>(GET_CONTRACTOR_SQL)
            .bind(contractor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a contractor and hold its row lock until the transaction ends.
    pub(crate) async fn lock_contractor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contractor: ContractorUuid,
    ) -> Result<ContractorRecord, sqlx::Error> {
        query_as::<Postgres, ContractorRecord>(LOCK_CONTRACTOR_SQL)
            .bind(contractor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_contractor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contractor: &NewContractor,
    ) -> Result<ContractorRecord, sqlx::Error> {
        query_as::<Postgres, ContractorRecord>(CREATE_CONTRACTOR_SQL)
            .bind(contractor.uuid.into_uuid())
            .bind(contractor.group_uuid.into_uuid())
            .bind(&contractor.name)
            .bind(&contractor.surname)
            .bind(&contractor.email)
            .bind(&contractor.phone)
            .bind(&contractor.photo_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_contractor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contractor: ContractorUuid,
        update: &ContractorUpdate,
    ) -> Result<ContractorRecord, sqlx::Error> {
        query_as::<Postgres, ContractorRecord>(UPDATE_CONTRACTOR_SQL)
            .bind(contractor.into_uuid())
            .bind(&update.name)
            .bind(&update.surname)
            .bind(&update.email)
            .bind(&update.phone)
            .bind(&update.photo_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn save_request_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contractor: &ContractorRecord,
    ) -> Result<ContractorRecord, sqlx::Error> {
        query_as::<Postgres, ContractorRecord>(SAVE_REQUEST_STATE_SQL)
            .bind(contractor.uuid.into_uuid())
            .bind(Json(&contractor.last_requests))
            .bind(contractor.last_aggregation_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_contractor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contractor: ContractorUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CONTRACTOR_SQL)
            .bind(contractor.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ContractorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(last_requests) = row.try_get::<Json<Vec<LastRequest>>, _>("last_requests")?;

        Ok(Self {
            uuid: ContractorUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            group_uuid: GroupUuid::from_uuid(row.try_get::<Uuid, _>("group_uuid")?),
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            photo_url: row.try_get("photo_url")?,
            last_requests,
            last_aggregation_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_aggregation_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
