//! Owners service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::owners::{
        data::{NewOwner, OwnerUpdate},
        errors::OwnersServiceError,
        records::{OwnerId, OwnerRecord},
        repository::PgOwnersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOwnersService {
    db: Db,
    repository: PgOwnersRepository,
}

impl PgOwnersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOwnersRepository::new(),
        }
    }
}

#[async_trait]
impl OwnersService for PgOwnersService {
    async fn get_owner(&self, owner: &OwnerId) -> Result<OwnerRecord, OwnersServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self.repository.get_owner(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(owner)
    }

    async fn create_owner(&self, owner: NewOwner) -> Result<OwnerRecord, OwnersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_owner(&mut tx, &owner).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_owner(
        &self,
        owner: &OwnerId,
        update: OwnerUpdate,
    ) -> Result<OwnerRecord, OwnersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_owner(&mut tx, owner, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_owner(&self, owner: &OwnerId) -> Result<(), OwnersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_owner(&mut tx, owner).await?;

        if rows_affected == 0 {
            return Err(OwnersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OwnersService: Send + Sync {
    /// Retrieve an owner by identity provider id.
    async fn get_owner(&self, owner: &OwnerId) -> Result<OwnerRecord, OwnersServiceError>;

    /// Create an owner profile.
    async fn create_owner(&self, owner: NewOwner) -> Result<OwnerRecord, OwnersServiceError>;

    /// Update an owner's profile fields.
    async fn update_owner(
        &self,
        owner: &OwnerId,
        update: OwnerUpdate,
    ) -> Result<OwnerRecord, OwnersServiceError>;

    /// Delete an owner. Fails while the owner still has a group.
    async fn delete_owner(&self, owner: &OwnerId) -> Result<(), OwnersServiceError>;
}
