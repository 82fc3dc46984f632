//! Update Contractor Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    contractors::{
        errors::into_status_error,
        group_contractor,
        handlers::{ContractorRequest, ContractorResponse},
    },
    extensions::*,
};

/// Update Contractor Handler
///
/// Replaces profile fields; request history is kept.
#[endpoint(
    tags("contractors"),
    summary = "Update Contractor",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    contractor: PathParam<Uuid>,
    json: JsonBody<ContractorRequest>,
    depot: &mut Depot,
) -> Result<Json<ContractorResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;
    let profile = json.into_inner().validated()?;

    let contractor = group_contractor(
        state,
        session,
        group.into_inner().into(),
        contractor.into_inner().into(),
    )
    .await?;

    let updated = state
        .app
        .contractors
        .update_contractor(contractor.uuid, profile.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use jobsender_app::domain::{
        contractors::{ContractorsServiceError, records::ContractorUuid},
        groups::records::GroupUuid,
    };

    use crate::test_helpers::{Mocks, TEST_OWNER_ID, make_contractor, make_group};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(
            Router::with_path("groups/{group}/contractors/{contractor}").put(handler),
        )
    }

    fn existing(mocks: &mut Mocks, group: GroupUuid, uuid: ContractorUuid) {
        mocks
            .groups
            .expect_get_group()
            .once()
            .return_once(move |_| Ok(make_group(group, TEST_OWNER_ID)));

        mocks
            .contractors
            .expect_get_contractor()
            .once()
            .return_once(move |_| Ok(make_contractor(uuid, group)));
    }

    #[tokio::test]
    async fn test_update_contractor_returns_200() -> TestResult {
        let group = GroupUuid::new();
        let uuid = ContractorUuid::new();
        let mut mocks = Mocks::default();

        existing(&mut mocks, group, uuid);

        mocks
            .contractors
            .expect_update_contractor()
            .once()
            .withf(move |contractor, update| *contractor == uuid && update.name == "Janet")
            .return_once(move |_, update| {
                let mut updated = make_contractor(uuid, group);

                updated.name = update.name;

                Ok(updated)
            });

        let mut res = TestClient::put(format!(
            "http://example.com/groups/{group}/contractors/{uuid}"
        ))
        .json(&json!({ "name": "Janet", "surname": "Doe", "email": "jane@example.com" }))
        .send(&make_service(mocks))
        .await;

        let body: ContractorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "Janet");

        Ok(())
    }

    #[tokio::test]
    async fn test_email_taken_returns_409() {
        let group = GroupUuid::new();
        let uuid = ContractorUuid::new();
        let mut mocks = Mocks::default();

        existing(&mut mocks, group, uuid);

        mocks
            .contractors
            .expect_update_contractor()
            .once()
            .return_once(|_, _| Err(ContractorsServiceError::AlreadyExists));

        let res = TestClient::put(format!(
            "http://example.com/groups/{group}/contractors/{uuid}"
        ))
        .json(&json!({ "name": "Jane", "surname": "Doe", "email": "taken@example.com" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_email_with_line_break_returns_400() {
        let res = TestClient::put(format!(
            "http://example.com/groups/{}/contractors/{}",
            GroupUuid::new(),
            ContractorUuid::new()
        ))
        .json(&json!({
            "name": "Jane",
            "surname": "Doe",
            "email": "jane@example.com\r\nBcc: someone@elsewhere.example",
        }))
        .send(&make_service(Mocks::default()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
