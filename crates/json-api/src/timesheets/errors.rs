//! Timesheet Errors

use salvo::http::StatusError;
use tracing::error;

use jobsender_app::{
    cycle::{DispatchError, ImportError},
    domain::{groups::GroupsServiceError, timesheets::TimesheetsServiceError},
};

pub(crate) fn into_status_error(error: TimesheetsServiceError) -> StatusError {
    match error {
        TimesheetsServiceError::NotFound | TimesheetsServiceError::InvalidReference => {
            StatusError::not_found().brief("Timesheets not found")
        }
        TimesheetsServiceError::AlreadyExists
        | TimesheetsServiceError::MissingRequiredData
        | TimesheetsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid timesheet data")
        }
        TimesheetsServiceError::Sql(source) => {
            error!("timesheets storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Dispatch failures. Server errors make the scheduler retry.
pub(crate) fn dispatch_status_error(error: DispatchError) -> StatusError {
    match error {
        DispatchError::Group(GroupsServiceError::NotFound) => {
            StatusError::not_found().brief("Group not found")
        }
        other => {
            error!("timesheet request dispatch failed: {other}");

            StatusError::internal_server_error()
        }
    }
}

/// Import failures. Malformed tasks are rejected, everything else is retried.
pub(crate) fn import_status_error(error: ImportError) -> StatusError {
    match error {
        ImportError::ContractorNotFound => StatusError::not_found().brief("Contractor not found"),
        ImportError::GroupMismatch => {
            StatusError::bad_request().brief("Contractor does not belong to the group")
        }
        ImportError::MalformedRequestId(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        ImportError::Mailbox(source) => {
            error!("timesheet import mailbox error: {source}");

            StatusError::bad_gateway()
        }
        ImportError::Contractors(source) => {
            error!("timesheet import storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
