//! Owners Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    groups::records::GroupUuid,
    owners::{
        data::{NewOwner, OwnerUpdate},
        records::{OwnerId, OwnerRecord},
    },
};

const GET_OWNER_SQL: &str = include_str!("sql/get_owner.sql");
const CREATE_OWNER_SQL: &str = include_str!("sql/create_owner.sql");
const UPDATE_OWNER_SQL: &str = include_str!("sql/update_owner.sql");
const DELETE_OWNER_SQL: &str = include_str!("sql/delete_owner.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOwnersRepository;

impl PgOwnersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerId,
    ) -> Result<OwnerRecord, sqlx::Error> {
        query_as::<Postgres, OwnerRecord>(GET_OWNER_SQL)
            .bind(owner.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &NewOwner,
    ) -> Result<OwnerRecord, sqlx::Error> {
        query_as::<Postgres, OwnerRecord>(CREATE_OWNER_SQL)
            .bind(owner.id.as_str())
            .bind(&owner.name)
            .bind(&owner.surname)
            .bind(&owner.email)
            .bind(&owner.phone)
            .bind(&owner.photo_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerId,
        update: &OwnerUpdate,
    ) -> Result<OwnerRecord, sqlx::Error> {
        query_as::<Postgres, OwnerRecord>(UPDATE_OWNER_SQL)
            .bind(owner.as_str())
            .bind(&update.name)
            .bind(&update.surname)
            .bind(&update.phone)
            .bind(&update.photo_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_OWNER_SQL)
            .bind(owner.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OwnerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OwnerId::new(row.try_get::<String, _>("id")?),
            group_uuid: row
                .try_get::<Option<Uuid>, _>("group_uuid")?
                .map(GroupUuid::from_uuid),
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            photo_url: row.try_get("photo_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
