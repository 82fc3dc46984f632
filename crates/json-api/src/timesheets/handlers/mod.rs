//! Timesheet Handlers

pub(crate) mod aggregate;
pub(crate) mod contractor_index;
pub(crate) mod index;
pub(crate) mod request;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobsender_app::domain::timesheets::records::TimesheetRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimesheetResponse {
    pub uuid: Uuid,
    pub contractor_uuid: Uuid,

    /// Request period token, e.g. `21_22-2024`
    pub request_id: String,

    /// Public URL of the stored file
    pub storage_url: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<TimesheetRecord> for TimesheetResponse {
    fn from(timesheet: TimesheetRecord) -> Self {
        TimesheetResponse {
            uuid: timesheet.uuid.into(),
            contractor_uuid: timesheet.contractor_uuid.into(),
            request_id: timesheet.request_id.to_string(),
            storage_url: timesheet.storage_url,
            created_at: timesheet.created_at.to_string(),
            updated_at: timesheet.updated_at.to_string(),
        }
    }
}
