//! Timesheet Records

use jiff::Timestamp;

use crate::{
    domain::{contractors::records::ContractorUuid, schedules::RequestId},
    uuids::TypedUuid,
};

/// Timesheet UUID
pub type TimesheetUuid = TypedUuid<TimesheetRecord>;

/// Timesheet Record
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetRecord {
    pub uuid: TimesheetUuid,
    pub contractor_uuid: ContractorUuid,
    pub request_id: RequestId,
    pub storage_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
