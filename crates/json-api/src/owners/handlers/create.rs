//! Create Owner Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use jobsender_app::domain::owners::data::NewOwner;

use crate::{
    extensions::*,
    owners::{
        errors::into_status_error,
        handlers::{OwnerProfileRequest, OwnerResponse},
    },
};

/// Create Owner Handler
///
/// Registers the signed in user as an owner. The id and email come from the
/// identity token.
#[endpoint(
    tags("owners"),
    summary = "Register Owner",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Owner registered"),
        (status_code = StatusCode::CONFLICT, description = "Owner already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<OwnerProfileRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OwnerResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;
    let profile = json.into_inner();

    let owner = state
        .app
        .owners
        .create_owner(NewOwner {
            id: session.owner_id.clone(),
            name: profile.name,
            surname: profile.surname,
            email: session.email.clone(),
            phone: profile.phone,
            photo_url: profile.photo_url,
        })
        .await
        .map_err(into_status_error)?;

    res.created_at("/owners/me")?;

    Ok(Json(owner.into()))
}
