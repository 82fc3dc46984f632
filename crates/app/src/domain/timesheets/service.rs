//! Timesheets service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        contractors::records::ContractorUuid,
        groups::records::GroupUuid,
        timesheets::{
            data::NewTimesheet, errors::TimesheetsServiceError, records::TimesheetRecord,
            repository::PgTimesheetsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTimesheetsService {
    db: Db,
    repository: PgTimesheetsRepository,
}

impl PgTimesheetsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTimesheetsRepository::new(),
        }
    }
}

#[async_trait]
impl TimesheetsService for PgTimesheetsService {
    async fn list_group_timesheets(
        &self,
        group: GroupUuid,
    ) -> Result<Vec<TimesheetRecord>, TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        let timesheets = self.repository.list_group_timesheets(&mut tx, group).await?;

        tx.commit().await?;

        Ok(timesheets)
    }

    async fn list_contractor_timesheets(
        &self,
        contractor: ContractorUuid,
    ) -> Result<Vec<TimesheetRecord>, TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        let timesheets = self
            .repository
            .list_contractor_timesheets(&mut tx, contractor)
            .await?;

        tx.commit().await?;

        Ok(timesheets)
    }

    async fn record_timesheet(
        &self,
        timesheet: NewTimesheet,
    ) -> Result<TimesheetRecord, TimesheetsServiceError> {
        let mut tx = self.db.begin().await?;

        let recorded = self.repository.record_timesheet(&mut tx, &timesheet).await?;

        tx.commit().await?;

        Ok(recorded)
    }
}

#[automock]
#[async_trait]
pub trait TimesheetsService: Send + Sync {
    /// Retrieve the timesheets of every contractor in a group.
    async fn list_group_timesheets(
        &self,
        group: GroupUuid,
    ) -> Result<Vec<TimesheetRecord>, TimesheetsServiceError>;

    /// Retrieve a contractor's timesheets.
    async fn list_contractor_timesheets(
        &self,
        contractor: ContractorUuid,
    ) -> Result<Vec<TimesheetRecord>, TimesheetsServiceError>;

    /// Record an imported timesheet.
    ///
    /// A second import for the same contractor and request only replaces the
    /// storage URL.
    async fn record_timesheet(
        &self,
        timesheet: NewTimesheet,
    ) -> Result<TimesheetRecord, TimesheetsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            contractors::ContractorsService,
            owners::OwnersService,
            schedules::RequestId,
            timesheets::records::TimesheetUuid,
        },
        test::{
            TestContext,
            helpers::{new_contractor, new_owner},
        },
    };

    use super::*;

    #[tokio::test]
    async fn record_timesheet_is_unique_per_contractor_and_request() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.owners.create_owner(new_owner("owner-1")).await?;
        let group = ctx.create_group(&owner.id).await?;
        let contractor = ctx
            .contractors
            .create_contractor(new_contractor(group.uuid, "jane@example.com"))
            .await?;

        let first = ctx
            .timesheets
            .record_timesheet(NewTimesheet {
                uuid: TimesheetUuid::new(),
                contractor_uuid: contractor.uuid,
                request_id: RequestId::new("21_22-2024"),
                storage_url: "https://storage.example/a.pdf".to_string(),
            })
            .await?;

        let second = ctx
            .timesheets
            .record_timesheet(NewTimesheet {
                uuid: TimesheetUuid::new(),
                contractor_uuid: contractor.uuid,
                request_id: RequestId::new("21_22-2024"),
                storage_url: "https://storage.example/b.xlsx".to_string(),
            })
            .await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(second.storage_url, "https://storage.example/b.xlsx");

        let listed = ctx.timesheets.list_group_timesheets(group.uuid).await?;

        assert_eq!(listed, vec![second]);

        Ok(())
    }

    #[tokio::test]
    async fn record_timesheet_for_unknown_contractor_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .timesheets
            .record_timesheet(NewTimesheet {
                uuid: TimesheetUuid::new(),
                contractor_uuid: ContractorUuid::new(),
                request_id: RequestId::new("21_22-2024"),
                storage_url: String::new(),
            })
            .await;

        assert!(
            matches!(result, Err(TimesheetsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
