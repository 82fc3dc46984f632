//! Update Group Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use jobsender_app::domain::groups::data::GroupUpdate;

use crate::{
    extensions::*,
    groups::{
        errors::{into_status_error, scheduler_error},
        handlers::{GroupRequest, GroupResponse},
        owned_group,
    },
};

/// Update Group Handler
///
/// Replaces the name and schedule, then moves the scheduler job to the new
/// schedule.
#[endpoint(
    tags("groups"),
    summary = "Update Group",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Group updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Group not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid schedule"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Scheduler job could not be updated"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    json: JsonBody<GroupRequest>,
    depot: &mut Depot,
) -> Result<Json<GroupResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;
    let (name, schedule) = json.into_inner().into_parts()?;

    let group = owned_group(state, session, group.into_inner().into()).await?;

    let updated = state
        .app
        .groups
        .update_group(group.uuid, GroupUpdate { name, schedule })
        .await
        .map_err(into_status_error)?;

    state
        .app
        .scheduler
        .update_job(updated.uuid, &updated.schedule)
        .await
        .map_err(|source| scheduler_error(&source))?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;

    use jobsender_app::{
        cloud::CloudError,
        domain::{
            groups::records::GroupUuid,
            schedules::{Recurrence, Weekday},
        },
    };

    use crate::{
        groups::handlers::{ScheduleBody, tests::weekly_body},
        test_helpers::{Mocks, TEST_OWNER_ID, make_group},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("groups/{group}").put(handler))
    }

    fn monday_body() -> serde_json::Value {
        json!({
            "name": "Day shift",
            "schedule": ScheduleBody {
                weekday: Some("Monday".to_string()),
                ..weekly_body()
            },
        })
    }

    #[tokio::test]
    async fn test_update_group_moves_scheduler_job() {
        let uuid = GroupUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .groups
            .expect_get_group()
            .once()
            .return_once(move |_| Ok(make_group(uuid, TEST_OWNER_ID)));

        mocks
            .groups
            .expect_update_group()
            .once()
            .withf(move |group, update| {
                *group == uuid
                    && update.name == "Day shift"
                    && update.schedule.recurrence
                        == Recurrence::Weeks {
                            weekday: Weekday::Monday,
                        }
            })
            .return_once(|group, update| {
                let mut updated = make_group(group, TEST_OWNER_ID);

                updated.name = update.name;
                updated.schedule = update.schedule;

                Ok(updated)
            });

        mocks
            .scheduler
            .expect_update_job()
            .once()
            .withf(move |group, schedule| {
                *group == uuid && schedule.recurrence.weekday() == Some(Weekday::Monday)
            })
            .return_once(|_, _| Ok(()));

        let res = TestClient::put(format!("http://example.com/groups/{uuid}"))
            .json(&monday_body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_update_foreign_group_returns_404() {
        let uuid = GroupUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .groups
            .expect_get_group()
            .once()
            .return_once(move |_| Ok(make_group(uuid, "someone-else")));

        let res = TestClient::put(format!("http://example.com/groups/{uuid}"))
            .json(&monday_body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_scheduler_failure_returns_502() {
        let uuid = GroupUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .groups
            .expect_get_group()
            .once()
            .return_once(move |_| Ok(make_group(uuid, TEST_OWNER_ID)));

        mocks
            .groups
            .expect_update_group()
            .once()
            .return_once(|group, _| Ok(make_group(group, TEST_OWNER_ID)));

        mocks
            .scheduler
            .expect_update_job()
            .once()
            .return_once(|_, _| Err(CloudError::UnexpectedResponse("quota".to_string())));

        let res = TestClient::put(format!("http://example.com/groups/{uuid}"))
            .json(&monday_body())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));
    }
}
