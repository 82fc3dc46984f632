//! List Contractor Timesheets Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    contractors::group_contractor,
    extensions::*,
    timesheets::{errors::into_status_error, handlers::TimesheetResponse},
};

/// List Contractor Timesheets Handler
#[endpoint(
    tags("timesheets"),
    summary = "List Contractor Timesheets",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    contractor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<TimesheetResponse>>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let contractor = group_contractor(
        state,
        session,
        group.into_inner().into(),
        contractor.into_inner().into(),
    )
    .await?;

    let timesheets = state
        .app
        .timesheets
        .list_contractor_timesheets(contractor.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(timesheets.into_iter().map(Into::into).collect()))
}
