//! Delete Group Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use jobsender_app::reporting::ErrorReport;

use crate::{
    extensions::*,
    groups::{
        errors::{into_status_error, scheduler_error},
        owned_group,
    },
};

/// Delete Group Handler
///
/// Stops the scheduler job, deletes the group with its contractors and
/// timesheets, then purges the stored timesheet files.
#[endpoint(
    tags("groups"),
    summary = "Delete Group",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Group deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Group not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Scheduler job could not be deleted"),
    ),
)]
pub(crate) async fn handler(
    group: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_401()?;

    let group = owned_group(state, session, group.into_inner().into()).await?;

    state
        .app
        .scheduler
        .delete_job(group.uuid)
        .await
        .map_err(|source| scheduler_error(&source))?;

    state
        .app
        .groups
        .delete_group(group.uuid)
        .await
        .map_err(into_status_error)?;

    // The records are gone; leftover files are reported rather than failing the request.
    if let Err(source) = state
        .app
        .blobs
        .delete_prefix(&format!("{}/", group.uuid))
        .await
    {
        state
            .app
            .reporter
            .report(ErrorReport::new("delete group files", &source))
            .await;
    }

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
