//! Delete Owner Handler

use salvo::prelude::*;

use crate::{extensions::*, owners::errors::into_status_error};

/// Delete Owner Handler
///
/// Owners must delete their group first.
#[endpoint(
    tags("owners"),
    summary = "Delete Current Owner",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Owner deleted"),
        (status_code = StatusCode::CONFLICT, description = "Owner still owns a group"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    state
        .app
        .owners
        .delete_owner(&session.owner_id)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use jobsender_app::domain::owners::OwnersServiceError;

    use crate::test_helpers::{Mocks, TEST_OWNER_ID};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("owners/me").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_owner_returns_204() {
        let mut mocks = Mocks::default();

        mocks
            .owners
            .expect_delete_owner()
            .once()
            .withf(|owner| owner.as_str() == TEST_OWNER_ID)
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/owners/me")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn test_delete_owner_with_group_returns_409() {
        let mut mocks = Mocks::default();

        mocks
            .owners
            .expect_delete_owner()
            .once()
            .return_once(|_| Err(OwnersServiceError::InvalidReference));

        let res = TestClient::delete("http://example.com/owners/me")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}
