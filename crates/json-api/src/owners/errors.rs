//! Owner Errors

use salvo::http::StatusError;
use tracing::error;

use jobsender_app::domain::owners::OwnersServiceError;

pub(crate) fn into_status_error(error: OwnersServiceError) -> StatusError {
    match error {
        OwnersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Owner already exists")
        }
        OwnersServiceError::InvalidReference => {
            StatusError::conflict().brief("Owner still owns a group")
        }
        OwnersServiceError::MissingRequiredData | OwnersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid owner payload")
        }
        OwnersServiceError::NotFound => StatusError::not_found().brief("Owner not found"),
        OwnersServiceError::Sql(source) => {
            error!("owners storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
