//! Contractors service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        contractors::{
            data::{ContractorUpdate, NewContractor},
            errors::ContractorsServiceError,
            records::{ContractorRecord, ContractorUuid},
            repository::PgContractorsRepository,
            tracking::{ChangeOutcome, ContractorChange},
        },
        groups::records::GroupUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgContractorsService {
    db: Db,
    repository: PgContractorsRepository,
}

impl PgContractorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgContractorsRepository::new(),
        }
    }
}

#[async_trait]
impl ContractorsService for PgContractorsService {
    async fn list_contractors(
        &self,
        group: GroupUuid,
    ) -> Result<Vec<ContractorRecord>, ContractorsServiceError> {
        let mut tx = self.db.begin().await?;

        let contractors = self.repository.list_contractors(&mut tx, group).await?;

        tx.commit().await?;

        Ok(contractors)
    }

    async fn get_contractor(
        &self,
        contractor: ContractorUuid,
    ) -> Result<ContractorRecord, ContractorsServiceError> {
        let mut tx = self.db.begin().await?;

        let contractor = self.repository.get_contractor(&mut tx, contractor).await?;

        tx.commit().await?;

        Ok(contractor)
    }

    async fn create_contractor(
        &self,
        contractor: NewContractor,
    ) -> Result<ContractorRecord, ContractorsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_contractor(&mut tx, &contractor)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_contractor(
        &self,
        contractor: ContractorUuid,
        update: ContractorUpdate,
    ) -> Result<ContractorRecord, ContractorsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_contractor(&mut tx, contractor, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_contractor(
        &self,
        contractor: ContractorUuid,
    ) -> Result<(), ContractorsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_contractor(&mut tx, contractor)
            .await?;

        if rows_affected == 0 {
            return Err(ContractorsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn apply_change(
        &self,
        contractor: ContractorUuid,
        change: ContractorChange,
    ) -> Result<ChangeOutcome, ContractorsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut current = self.repository.lock_contractor(&mut tx, contractor).await?;

        if !change.apply(&mut current) {
            tx.rollback().await?;

            return Ok(ChangeOutcome {
                contractor: current,
                applied: false,
            });
        }

        let saved = self
            .repository
            .save_request_state(&mut tx, &current)
            .await?;

        tx.commit().await?;

        Ok(ChangeOutcome {
            contractor: saved,
            applied: true,
        })
    }
}

#[automock]
#[async_trait]
pub trait ContractorsService: Send + Sync {
    /// Retrieve all contractors of a group.
    async fn list_contractors(
        &self,
        group: GroupUuid,
    ) -> Result<Vec<ContractorRecord>, ContractorsServiceError>;

    /// Retrieve a single contractor.
    async fn get_contractor(
        &self,
        contractor: ContractorUuid,
    ) -> Result<ContractorRecord, ContractorsServiceError>;

    /// Add a contractor to a group.
    async fn create_contractor(
        &self,
        contractor: NewContractor,
    ) -> Result<ContractorRecord, ContractorsServiceError>;

    /// Update a contractor's profile fields. Request state is left untouched.
    async fn update_contractor(
        &self,
        contractor: ContractorUuid,
        update: ContractorUpdate,
    ) -> Result<ContractorRecord, ContractorsServiceError>;

    /// Delete a contractor and its timesheets.
    async fn delete_contractor(
        &self,
        contractor: ContractorUuid,
    ) -> Result<(), ContractorsServiceError>;

    /// Apply a request state change under a row lock.
    ///
    /// The change sees the latest committed state; it is persisted only when
    /// it reports that something changed.
    async fn apply_change(
        &self,
        contractor: ContractorUuid,
        change: ContractorChange,
    ) -> Result<ChangeOutcome, ContractorsServiceError>;
}
