//! Groups

mod errors;
mod handlers;

use salvo::http::StatusError;

use jobsender_app::{
    cloud::SessionData,
    domain::groups::records::{GroupRecord, GroupUuid},
};

use crate::state::State;

pub(crate) use handlers::*;

/// Load a group the caller owns.
///
/// Groups owned by someone else are reported as missing.
pub(crate) async fn owned_group(
    state: &State,
    session: &SessionData,
    group: GroupUuid,
) -> Result<GroupRecord, StatusError> {
    let group = state
        .app
        .groups
        .get_group(group)
        .await
        .map_err(errors::into_status_error)?;

    if group.owner_id != session.owner_id {
        return Err(StatusError::not_found().brief("Group not found"));
    }

    Ok(group)
}
