//! Group Errors

use salvo::http::StatusError;
use tracing::error;

use jobsender_app::{cloud::CloudError, domain::groups::GroupsServiceError};

pub(crate) fn into_status_error(error: GroupsServiceError) -> StatusError {
    match error {
        GroupsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Owner already has a group")
        }
        GroupsServiceError::InvalidReference => {
            StatusError::conflict().brief("Register as an owner before creating a group")
        }
        GroupsServiceError::MissingRequiredData | GroupsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid group payload")
        }
        GroupsServiceError::NotFound => StatusError::not_found().brief("Group not found"),
        GroupsServiceError::Sql(source) => {
            error!("groups storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn scheduler_error(error: &CloudError) -> StatusError {
    error!("scheduler job request failed: {error}");

    StatusError::bad_gateway().brief("Failed to update the request schedule")
}
