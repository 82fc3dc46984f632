//! Delete Contractor Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    contractors::{errors::into_status_error, group_contractor},
    extensions::*,
};

/// Delete Contractor Handler
///
/// Deletes the contractor and its timesheet records. Stored files are kept
/// until the group is deleted.
#[endpoint(
    tags("contractors"),
    summary = "Delete Contractor",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Contractor deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Contractor not found"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    contractor: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let contractor = group_contractor(
        state,
        session,
        group.into_inner().into(),
        contractor.into_inner().into(),
    )
    .await?;

    state
        .app
        .contractors
        .delete_contractor(contractor.uuid)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
