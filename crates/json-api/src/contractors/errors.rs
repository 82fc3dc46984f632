//! Contractor Errors

use salvo::http::StatusError;
use tracing::error;

use jobsender_app::domain::contractors::ContractorsServiceError;

pub(crate) fn into_status_error(error: ContractorsServiceError) -> StatusError {
    match error {
        ContractorsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A contractor with this email already exists")
        }
        ContractorsServiceError::InvalidReference => {
            StatusError::not_found().brief("Group not found")
        }
        ContractorsServiceError::MissingRequiredData | ContractorsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid contractor payload")
        }
        ContractorsServiceError::NotFound => {
            StatusError::not_found().brief("Contractor not found")
        }
        ContractorsServiceError::Sql(source) => {
            error!("contractors storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
