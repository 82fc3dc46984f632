//! Get Owner Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    owners::{errors::into_status_error, handlers::OwnerResponse},
};

/// Get Owner Handler
///
/// Returns the profile of the signed in owner.
#[endpoint(
    tags("owners"),
    summary = "Get Current Owner",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OwnerResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let owner = state
        .app
        .owners
        .get_owner(&session.owner_id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(owner.into()))
}
