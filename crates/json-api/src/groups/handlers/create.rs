//! Create Group Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::error;

use jobsender_app::domain::groups::{data::NewGroup, records::GroupUuid};

use crate::{
    extensions::*,
    groups::{
        errors::{into_status_error, scheduler_error},
        handlers::{GroupRequest, GroupResponse},
    },
};

/// Create Group Handler
///
/// Creates the caller's group and the scheduler job that triggers its
/// timesheet requests.
#[endpoint(
    tags("groups"),
    summary = "Create Group",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Group created"),
        (status_code = StatusCode::CONFLICT, description = "Owner already has a group"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid schedule"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Scheduler job could not be created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<GroupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<GroupResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;
    let (name, schedule) = json.into_inner().into_parts()?;

    let group = state
        .app
        .groups
        .create_group(NewGroup {
            uuid: GroupUuid::new(),
            owner_id: session.owner_id.clone(),
            name,
            schedule,
        })
        .await
        .map_err(into_status_error)?;

    if let Err(source) = state
        .app
        .scheduler
        .create_job(group.uuid, &group.schedule)
        .await
    {
        // A group without a job would never send requests.
        if let Err(cleanup) = state.app.groups.delete_group(group.uuid).await {
            error!(group = %group.uuid, "failed to remove group without scheduler job: {cleanup}");
        }

        return Err(scheduler_error(&source));
    }

    res.created_at(format!("/groups/{}", group.uuid))?;

    Ok(Json(group.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use jobsender_app::{cloud::CloudError, domain::groups::GroupsServiceError};

    use crate::{
        groups::handlers::tests::weekly_body,
        test_helpers::{Mocks, TEST_OWNER_ID, make_group, weekly_schedule},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("groups").post(handler))
    }

    fn body() -> serde_json::Value {
        json!({ "name": "Night shift", "schedule": weekly_body() })
    }

    #[tokio::test]
    async fn test_create_group_creates_scheduler_job() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .groups
            .expect_create_group()
            .once()
            .withf(|new| {
                new.owner_id.as_str() == TEST_OWNER_ID
                    && new.name == "Night shift"
                    && new.schedule == weekly_schedule()
            })
            .return_once(|new| Ok(make_group(new.uuid, TEST_OWNER_ID)));

        mocks
            .scheduler
            .expect_create_job()
            .once()
            .withf(|_, schedule| *schedule == weekly_schedule())
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::post("http://example.com/groups")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        let created: GroupResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/groups/{}", created.uuid).as_str()));
        assert_eq!(created.cron, "0 17 * * 5");

        Ok(())
    }

    #[tokio::test]
    async fn test_scheduler_failure_removes_group_and_returns_502() {
        let mut mocks = Mocks::default();

        mocks
            .groups
            .expect_create_group()
            .once()
            .return_once(|new| Ok(make_group(new.uuid, TEST_OWNER_ID)));

        mocks
            .scheduler
            .expect_create_job()
            .once()
            .return_once(|_, _| Err(CloudError::Unauthenticated));

        mocks
            .groups
            .expect_delete_group()
            .once()
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/groups")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn test_second_group_returns_409() {
        let mut mocks = Mocks::default();

        mocks
            .groups
            .expect_create_group()
            .once()
            .return_once(|_| Err(GroupsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/groups")
            .json(&body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_invalid_schedule_returns_400_without_storage() {
        let res = TestClient::post("http://example.com/groups")
            .json(&json!({
                "name": "Night shift",
                "schedule": { "interval_type": "days", "interval": 1, "timezone": "UTC",
                    "time": "09:00", "start_date": "2024-01-01", "end_date": "2024-12-31" }
            }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
