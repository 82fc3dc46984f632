//! Aggregate Timesheets Handler

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobsender_app::{
    cycle::{AggregationTask, ImportSummary},
    domain::schedules::RequestId,
};

use crate::{extensions::*, timesheets::errors::import_status_error};

/// Aggregation task body as queued by the aggregation trigger.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AggregateRequest {
    #[serde(rename = "GroupID")]
    pub group_id: Uuid,

    #[serde(rename = "ContractorID")]
    pub contractor_id: Uuid,

    /// Request period token, e.g. `21_22-2024`
    #[serde(rename = "RequestID")]
    pub request_id: String,
}

impl From<AggregateRequest> for AggregationTask {
    fn from(request: AggregateRequest) -> Self {
        AggregationTask {
            group_uuid: request.group_id.into(),
            contractor_uuid: request.contractor_id.into(),
            request_id: RequestId::new(request.request_id),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportSummaryResponse {
    pub matched: usize,
    pub imported: usize,
    pub archived: usize,
    pub failed: usize,
}

impl From<ImportSummary> for ImportSummaryResponse {
    fn from(summary: ImportSummary) -> Self {
        ImportSummaryResponse {
            matched: summary.matched,
            imported: summary.imported,
            archived: summary.archived,
            failed: summary.failed,
        }
    }
}

/// Aggregate Timesheets Handler
///
/// Called by the task queue. Imports replied timesheets for one contractor
/// and request period from the mailbox.
#[endpoint(
    tags("timesheets"),
    summary = "Import Emailed Timesheets",
    responses(
        (status_code = StatusCode::OK, description = "Mailbox processed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed task"),
        (status_code = StatusCode::NOT_FOUND, description = "Contractor not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AggregateRequest>,
    depot: &mut Depot,
) -> Result<Json<ImportSummaryResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let task = AggregationTask::from(json.into_inner());

    let summary = state
        .app
        .importer
        .import_for_period(&task, Timestamp::now())
        .await
        .map_err(import_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use jobsender_app::{
        cloud::CloudError,
        cycle::ImportError,
        domain::{contractors::records::ContractorUuid, groups::records::GroupUuid},
    };

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_public_service(Router::with_path("timesheets/aggregate").post(handler))
    }

    fn task_body(group: GroupUuid, contractor: ContractorUuid) -> serde_json::Value {
        json!({ "GroupID": group, "ContractorID": contractor, "RequestID": "21_22-2024" })
    }

    #[tokio::test]
    async fn test_aggregate_imports_task_period() -> TestResult {
        let group = GroupUuid::new();
        let contractor = ContractorUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .importer
            .expect_import_for_period()
            .once()
            .withf(move |task, _| {
                *task
                    == AggregationTask {
                        group_uuid: group,
                        contractor_uuid: contractor,
                        request_id: RequestId::new("21_22-2024"),
                    }
            })
            .return_once(|_, _| {
                Ok(ImportSummary {
                    matched: 1,
                    imported: 2,
                    archived: 1,
                    failed: 0,
                })
            });

        let mut res = TestClient::post("http://example.com/timesheets/aggregate")
            .json(&task_body(group, contractor))
            .send(&make_service(mocks))
            .await;

        let body: ImportSummaryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.imported, 2);
        assert_eq!(body.archived, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_contractor_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .importer
            .expect_import_for_period()
            .once()
            .return_once(|_, _| Err(ImportError::ContractorNotFound));

        let res = TestClient::post("http://example.com/timesheets/aggregate")
            .json(&task_body(GroupUuid::new(), ContractorUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_mailbox_failure_returns_502_for_retry() {
        let mut mocks = Mocks::default();

        mocks
            .importer
            .expect_import_for_period()
            .once()
            .return_once(|_, _| Err(ImportError::Mailbox(CloudError::Unauthenticated)));

        let res = TestClient::post("http://example.com/timesheets/aggregate")
            .json(&task_body(GroupUuid::new(), ContractorUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn test_body_without_request_id_returns_400() {
        let res = TestClient::post("http://example.com/timesheets/aggregate")
            .json(&json!({ "GroupID": GroupUuid::new(), "ContractorID": ContractorUuid::new() }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
