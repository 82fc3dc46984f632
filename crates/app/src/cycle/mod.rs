//! Timesheet request and aggregation cycle.
//!
//! The dispatcher emails contractors when a group's schedule fires, the
//! aggregation trigger queues imports for outstanding requests, and the
//! importer harvests replies from the mailbox.

pub mod aggregation;
pub mod attachments;
pub mod dispatcher;
pub mod importer;

pub use aggregation::{AggregationError, AggregationService, AggregationTask, AggregationTrigger};
pub use dispatcher::{
    DispatchError, DispatchOutcome, DispatchSummary, RequestDispatchService, RequestDispatcher,
};
pub use importer::{AttachmentImporter, ImportError, ImportService, ImportSummary};

use crate::domain::{contractors::records::ContractorUuid, schedules::PeriodId};

/// Subject line shared by a request email and the replies matched against it.
#[must_use]
pub fn request_subject(period: PeriodId, contractor: ContractorUuid) -> String {
    format!("Timesheet {period} [{contractor}]")
}
