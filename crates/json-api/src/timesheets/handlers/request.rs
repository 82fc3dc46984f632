//! Request Timesheets Handler

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobsender_app::{cycle::DispatchOutcome, domain::groups::records::GroupUuid};

use crate::{extensions::*, timesheets::errors::dispatch_status_error};

/// Query parameter the scheduler job puts the group id in.
const GROUP_ID_PARAM: &str = "groupID";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum RequestTimesheetsResponse {
    /// The schedule does not fire in the current period.
    NotDue { reason: String },

    /// Request emails were processed for the current period.
    Dispatched {
        period: String,
        sent: usize,
        skipped: usize,
        failed: usize,
    },
}

impl From<DispatchOutcome> for RequestTimesheetsResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::NotDue(reason) => RequestTimesheetsResponse::NotDue {
                reason: reason.to_string(),
            },
            DispatchOutcome::Dispatched(summary) => RequestTimesheetsResponse::Dispatched {
                period: summary.period.to_string(),
                sent: summary.sent,
                skipped: summary.skipped,
                failed: summary.failed,
            },
        }
    }
}

/// Request Timesheets Handler
///
/// Called by the group's scheduler job. Emails every contractor that has
/// not been asked for the current period yet.
#[endpoint(
    tags("timesheets"),
    summary = "Send Timesheet Requests",
    parameters(("groupID" = Uuid, Query, description = "Group whose schedule fired")),
    responses(
        (status_code = StatusCode::OK, description = "Requests processed or schedule not due"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or malformed groupID"),
        (status_code = StatusCode::NOT_FOUND, description = "Group not found"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<RequestTimesheetsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let group = req
        .query::<String>(GROUP_ID_PARAM)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("groupID is required"))?
        .parse::<Uuid>()
        .map_err(|_error| StatusError::bad_request().brief("groupID must be a UUID"))?;

    let outcome = state
        .app
        .requests
        .dispatch_group_requests(GroupUuid::from_uuid(group), Timestamp::now())
        .await
        .map_err(dispatch_status_error)?;

    Ok(Json(outcome.into()))
}
