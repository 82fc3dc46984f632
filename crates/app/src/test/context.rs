//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        contractors::PgContractorsService,
        groups::{
            GroupsService, GroupsServiceError, PgGroupsService,
            data::NewGroup,
            records::{GroupRecord, GroupUuid},
        },
        owners::{PgOwnersService, records::OwnerId},
        schedules::records::tests::weekly,
        timesheets::PgTimesheetsService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub owners: PgOwnersService,
    pub groups: PgGroupsService,
    pub contractors: PgContractorsService,
    pub timesheets: PgTimesheetsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            owners: PgOwnersService::new(db.clone()),
            groups: PgGroupsService::new(db.clone()),
            contractors: PgContractorsService::new(db.clone()),
            timesheets: PgTimesheetsService::new(db),
            db: test_db,
        }
    }

    /// Create a weekly group for `owner`.
    pub async fn create_group(&self, owner: &OwnerId) -> Result<GroupRecord, GroupsServiceError> {
        self.groups
            .create_group(NewGroup {
                uuid: GroupUuid::new(),
                owner_id: owner.clone(),
                name: "Test Group".to_string(),
                schedule: weekly(1),
            })
            .await
    }
}
