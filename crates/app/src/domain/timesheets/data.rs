//! Timesheets Data

use crate::domain::{
    contractors::records::ContractorUuid, schedules::RequestId,
    timesheets::records::TimesheetUuid,
};

/// New Timesheet Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimesheet {
    pub uuid: TimesheetUuid,
    pub contractor_uuid: ContractorUuid,
    pub request_id: RequestId,
    pub storage_url: String,
}
