//! Get Group Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    groups::{handlers::GroupResponse, owned_group},
};

/// Get Group Handler
#[endpoint(
    tags("groups"),
    summary = "Get Group",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<GroupResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let group = owned_group(state, session, group.into_inner().into()).await?;

    Ok(Json(group.into()))
}
