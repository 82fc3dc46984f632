//! Groups service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::groups::{
        data::{GroupUpdate, NewGroup},
        errors::GroupsServiceError,
        records::{GroupRecord, GroupUuid},
        repository::PgGroupsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgGroupsService {
    db: Db,
    repository: PgGroupsRepository,
}

impl PgGroupsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgGroupsRepository::new(),
        }
    }
}

#[async_trait]
impl GroupsService for PgGroupsService {
    async fn get_group(&self, group: GroupUuid) -> Result<GroupRecord, GroupsServiceError> {
        let mut tx = self.db.begin().await?;

        let group = self.repository.get_group(&mut tx, group).await?;

        tx.commit().await?;

        Ok(group)
    }

    async fn create_group(&self, group: NewGroup) -> Result<GroupRecord, GroupsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_group(&mut tx, &group).await?;

        let rows_affected = self
            .repository
            .assign_owner_group(&mut tx, &group.owner_id, created.uuid)
            .await?;

        if rows_affected == 0 {
            return Err(GroupsServiceError::InvalidReference);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn update_group(
        &self,
        group: GroupUuid,
        update: GroupUpdate,
    ) -> Result<GroupRecord, GroupsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_group(&mut tx, group, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_group(&self, group: GroupUuid) -> Result<(), GroupsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_group(&mut tx, group).await?;

        if rows_affected == 0 {
            return Err(GroupsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait GroupsService: Send + Sync {
    /// Retrieve a single group with its schedule.
    async fn get_group(&self, group: GroupUuid) -> Result<GroupRecord, GroupsServiceError>;

    /// Create a group and link it to its owner.
    async fn create_group(&self, group: NewGroup) -> Result<GroupRecord, GroupsServiceError>;

    /// Replace a group's name and schedule.
    async fn update_group(
        &self,
        group: GroupUuid,
        update: GroupUpdate,
    ) -> Result<GroupRecord, GroupsServiceError>;

    /// Delete a group together with its contractors and timesheets.
    async fn delete_group(&self, group: GroupUuid) -> Result<(), GroupsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        domain::{
            contractors::{ContractorsService, ContractorsServiceError},
            owners::{OwnersService, records::OwnerId},
            schedules::records::tests::weekly,
        },
        test::{
            TestContext,
            helpers::{new_contractor, new_owner},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_group_links_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.owners.create_owner(new_owner("owner-1")).await?;

        let group = ctx.create_group(&owner.id).await?;
        let owner = ctx.owners.get_owner(&owner.id).await?;

        assert_eq!(owner.group_uuid, Some(group.uuid));
        assert_eq!(group.schedule, weekly(1));

        Ok(())
    }

    #[tokio::test]
    async fn create_group_for_unknown_owner_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .groups
            .create_group(NewGroup {
                uuid: GroupUuid::new(),
                owner_id: OwnerId::new("ghost"),
                name: "Ghosts".to_string(),
                schedule: weekly(1),
            })
            .await;

        assert!(
            matches!(result, Err(GroupsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_group_replaces_schedule() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.owners.create_owner(new_owner("owner-1")).await?;
        let group = ctx.create_group(&owner.id).await?;

        let mut schedule = weekly(2);
        schedule.end_date = date(2030, 6, 30);

        let updated = ctx
            .groups
            .update_group(
                group.uuid,
                GroupUpdate {
                    name: "Renamed".to_string(),
                    schedule: schedule.clone(),
                },
            )
            .await?;

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.schedule, schedule);

        Ok(())
    }

    #[tokio::test]
    async fn delete_group_cascades_and_unlinks_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.owners.create_owner(new_owner("owner-1")).await?;
        let group = ctx.create_group(&owner.id).await?;

        let contractor = ctx
            .contractors
            .create_contractor(new_contractor(group.uuid, "jane@example.com"))
            .await?;

        ctx.groups.delete_group(group.uuid).await?;

        let contractor = ctx.contractors.get_contractor(contractor.uuid).await;
        let owner = ctx.owners.get_owner(&owner.id).await?;

        assert!(
            matches!(contractor, Err(ContractorsServiceError::NotFound)),
            "expected contractor to be deleted, got {contractor:?}"
        );
        assert!(owner.group_uuid.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_group_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.groups.delete_group(GroupUuid::new()).await;

        assert!(
            matches!(result, Err(GroupsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
