//! Create Contractor Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use jobsender_app::domain::contractors::{data::NewContractor, records::ContractorUuid};

use crate::{
    contractors::{
        errors::into_status_error,
        handlers::{ContractorRequest, ContractorResponse},
    },
    extensions::*,
    groups::owned_group,
};

/// Create Contractor Handler
#[endpoint(
    tags("contractors"),
    summary = "Add Contractor",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Contractor added"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::NOT_FOUND, description = "Group not found"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    json: JsonBody<ContractorRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ContractorResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let profile = json.into_inner().validated()?;
    let group = owned_group(state, session, group.into_inner().into()).await?;

    let contractor = state
        .app
        .contractors
        .create_contractor(NewContractor {
            uuid: ContractorUuid::new(),
            group_uuid: group.uuid,
            name: profile.name,
            surname: profile.surname,
            email: profile.email,
            phone: profile.phone,
            photo_url: profile.photo_url,
        })
        .await
        .map_err(into_status_error)?;

    res.created_at(format!(
        "/groups/{}/contractors/{}",
        group.uuid, contractor.uuid
    ))?;

    Ok(Json(contractor.into()))
}
