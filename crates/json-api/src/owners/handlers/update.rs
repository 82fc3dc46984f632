//! Update Owner Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    owners::{
        errors::into_status_error,
        handlers::{OwnerProfileRequest, OwnerResponse},
    },
};

/// Update Owner Handler
#[endpoint(
    tags("owners"),
    summary = "Update Current Owner",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<OwnerProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<OwnerResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let owner = state
        .app
        .owners
        .update_owner(&session.owner_id, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(owner.into()))
}
