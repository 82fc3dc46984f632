//! Contractors

mod errors;
mod handlers;

use salvo::http::StatusError;

use jobsender_app::{
    cloud::SessionData,
    domain::{
        contractors::records::{ContractorRecord, ContractorUuid},
        groups::records::GroupUuid,
    },
};

use crate::{groups::owned_group, state::State};

pub(crate) use handlers::*;

/// Load a contractor of a group the caller owns.
pub(crate) async fn group_contractor(
    state: &State,
    session: &SessionData,
    group: GroupUuid,
    contractor: ContractorUuid,
) -> Result<ContractorRecord, StatusError> {
    let group = owned_group(state, session, group).await?;

    let contractor = state
        .app
        .contractors
        .get_contractor(contractor)
        .await
        .map_err(errors::into_status_error)?;

    if contractor.group_uuid != group.uuid {
        return Err(StatusError::not_found().brief("Contractor not found"));
    }

    Ok(contractor)
}
