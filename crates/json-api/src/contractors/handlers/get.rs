//! Get Contractor Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    contractors::{group_contractor, handlers::ContractorResponse},
    extensions::*,
};

/// Get Contractor Handler
#[endpoint(
    tags("contractors"),
    summary = "Get Contractor",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    contractor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ContractorResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let contractor = group_contractor(
        state,
        session,
        group.into_inner().into(),
        contractor.into_inner().into(),
    )
    .await?;

    Ok(Json(contractor.into()))
}
