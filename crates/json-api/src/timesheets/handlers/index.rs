//! List Group Timesheets Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    groups::owned_group,
    timesheets::{errors::into_status_error, handlers::TimesheetResponse},
};

/// List Group Timesheets Handler
///
/// Returns every imported timesheet of the group's contractors.
#[endpoint(
    tags("timesheets"),
    summary = "List Group Timesheets",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<TimesheetResponse>>, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let group = owned_group(state, session, group.into_inner().into()).await?;

    let timesheets = state
        .app
        .timesheets
        .list_group_timesheets(group.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(timesheets.into_iter().map(Into::into).collect()))
}
