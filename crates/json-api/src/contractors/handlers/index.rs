//! List Contractors Handler

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use jobsender_app::reporting::ErrorReport;

use crate::{
    contractors::{errors::into_status_error, handlers::ContractorResponse},
    extensions::*,
    groups::owned_group,
};

/// List Contractors Handler
///
/// Lists a group's contractors. Viewing the list also queues a mailbox
/// import for contractors with outstanding requests.
#[endpoint(
    tags("contractors"),
    summary = "List Contractors",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<ContractorResponse>>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let group = owned_group(state, session, group.into_inner().into()).await?;

    let contractors = state
        .app
        .contractors
        .list_contractors(group.uuid)
        .await
        .map_err(into_status_error)?;

    let now = Timestamp::now();

    for contractor in &contractors {
        if let Err(source) = state
            .app
            .aggregation
            .maybe_enqueue_aggregation(contractor, now)
            .await
        {
            state
                .app
                .reporter
                .report(ErrorReport::new("aggregation trigger", &source))
                .await;
        }
    }

    Ok(Json(contractors.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use jobsender_app::{
        cycle::AggregationError,
        domain::{
            contractors::{
                ContractorsServiceError,
                records::{ContractorUuid, LastRequest},
            },
            groups::records::GroupUuid,
            schedules::RequestId,
        },
    };

    use crate::test_helpers::{Mocks, TEST_OWNER_ID, make_contractor, make_group};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("groups/{group}/contractors").get(handler))
    }

    fn owned(mocks: &mut Mocks, uuid: GroupUuid) {
        mocks
            .groups
            .expect_get_group()
            .once()
            .return_once(move |_| Ok(make_group(uuid, TEST_OWNER_ID)));
    }

    #[tokio::test]
    async fn test_list_triggers_aggregation_per_contractor() -> TestResult {
        let group = GroupUuid::new();
        let mut pending = make_contractor(ContractorUuid::new(), group);

        pending.last_requests = vec![LastRequest::pending(RequestId::new("21_22-2024"))];

        let idle = make_contractor(ContractorUuid::new(), group);
        let contractors = vec![pending, idle];

        let mut mocks = Mocks::default();

        owned(&mut mocks, group);

        mocks
            .contractors
            .expect_list_contractors()
            .once()
            .withf(move |uuid| *uuid == group)
            .return_once(move |_| Ok(contractors));

        mocks
            .aggregation
            .expect_maybe_enqueue_aggregation()
            .times(2)
            .returning(|contractor, _| Ok(contractor.outstanding_requests().next().is_some()));

        let mut res = TestClient::get(format!("http://example.com/groups/{group}/contractors"))
            .send(&make_service(mocks))
            .await;

        let body: Vec<ContractorResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 2);
        assert_eq!(body.first().map(|c| c.last_requests.len()), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn test_aggregation_failure_is_reported_and_listing_succeeds() {
        let group = GroupUuid::new();
        let contractor = make_contractor(ContractorUuid::new(), group);
        let mut mocks = Mocks::default();

        owned(&mut mocks, group);

        mocks
            .contractors
            .expect_list_contractors()
            .return_once(move |_| Ok(vec![contractor]));

        mocks
            .aggregation
            .expect_maybe_enqueue_aggregation()
            .once()
            .return_once(|_, _| Err(AggregationError::Claim(ContractorsServiceError::InvalidData)));

        mocks
            .reporter
            .expect_report()
            .once()
            .withf(|report| report.context == "aggregation trigger")
            .return_once(|_| ());

        let res = TestClient::get(format!("http://example.com/groups/{group}/contractors"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_foreign_group_returns_404_without_listing() {
        let group = GroupUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .groups
            .expect_get_group()
            .once()
            .return_once(move |_| Ok(make_group(group, "someone-else")));

        mocks.contractors.expect_list_contractors().never();

        let res = TestClient::get(format!("http://example.com/groups/{group}/contractors"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
