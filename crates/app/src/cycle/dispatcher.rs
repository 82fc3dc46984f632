//! Request dispatch.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;

use crate::{
    cloud::mail::{MailSender, OutgoingEmail},
    cycle::request_subject,
    domain::{
        contractors::{
            ContractorChange, ContractorsService, ContractorsServiceError, needs_request,
            records::ContractorRecord,
        },
        groups::{GroupsService, GroupsServiceError, records::GroupUuid},
        schedules::{NotDue, PeriodId, RequestId, ScheduleError, evaluate},
    },
    reporting::{ErrorReport, ErrorReporter},
};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to load group")]
    Group(#[from] GroupsServiceError),

    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),

    #[error("failed to list contractors")]
    Contractors(#[from] ContractorsServiceError),
}

/// Counts for one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub period: PeriodId,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The schedule does not fire now; nothing was done.
    NotDue(NotDue),

    Dispatched(DispatchSummary),
}

#[automock]
#[async_trait]
pub trait RequestDispatchService: Send + Sync {
    /// Email every contractor of `group` that has not yet been asked for the
    /// period `now` falls in.
    async fn dispatch_group_requests(
        &self,
        group: GroupUuid,
        now: Timestamp,
    ) -> Result<DispatchOutcome, DispatchError>;
}

pub struct RequestDispatcher {
    groups: Arc<dyn GroupsService>,
    contractors: Arc<dyn ContractorsService>,
    mail: Arc<dyn MailSender>,
    reporter: Arc<dyn ErrorReporter>,
    sender: String,
}

impl Debug for RequestDispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RequestDispatcher")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl RequestDispatcher {
    #[must_use]
    pub fn new(
        groups: Arc<dyn GroupsService>,
        contractors: Arc<dyn ContractorsService>,
        mail: Arc<dyn MailSender>,
        reporter: Arc<dyn ErrorReporter>,
        sender: String,
    ) -> Self {
        Self {
            groups,
            contractors,
            mail,
            reporter,
            sender,
        }
    }

    fn request_email(&self, contractor: &ContractorRecord, period: PeriodId) -> OutgoingEmail {
        OutgoingEmail {
            from: self.sender.clone(),
            to: contractor.email.clone(),
            subject: request_subject(period, contractor.uuid),
            body: format!(
                "Hi {} {}. Please submit your timesheet. You can submit it by replying to this email with the timesheet attached.",
                contractor.name, contractor.surname
            ),
        }
    }

    /// Send and record one request. Returns `false` on a reported failure.
    async fn request_timesheet(
        &self,
        contractor: &ContractorRecord,
        period: PeriodId,
        request: &RequestId,
    ) -> bool {
        if let Err(error) = self.mail.send(self.request_email(contractor, period)).await {
            self.reporter
                .report(ErrorReport::new("dispatch", &error))
                .await;

            return false;
        }

        let change = ContractorChange::RecordRequest {
            request: request.clone(),
        };

        match self.contractors.apply_change(contractor.uuid, change).await {
            Ok(outcome) => {
                if !outcome.applied {
                    tracing::warn!(
                        contractor = %contractor.uuid,
                        %request,
                        "request was recorded concurrently"
                    );
                }

                true
            }
            Err(error) => {
                self.reporter
                    .report(ErrorReport::new("dispatch", &error))
                    .await;

                false
            }
        }
    }
}

#[async_trait]
impl RequestDispatchService for RequestDispatcher {
    async fn dispatch_group_requests(
        &self,
        group: GroupUuid,
        now: Timestamp,
    ) -> Result<DispatchOutcome, DispatchError> {
        let record = self.groups.get_group(group).await?;

        let period = match evaluate(&record.schedule, now) {
            Ok(period) => period,
            Err(ScheduleError::NotDue(reason)) => {
                tracing::debug!(%group, %reason, "schedule not due");

                return Ok(DispatchOutcome::NotDue(reason));
            }
            Err(ScheduleError::UnknownTimeZone(zone)) => {
                return Err(DispatchError::UnknownTimeZone(zone));
            }
        };

        let request = period.request_id();
        let contractors = self.contractors.list_contractors(group).await?;

        let mut summary = DispatchSummary {
            period,
            sent: 0,
            skipped: 0,
            failed: 0,
        };

        for contractor in &contractors {
            if !needs_request(contractor, &request) {
                summary.skipped += 1;
                continue;
            }

            if self.request_timesheet(contractor, period, &request).await {
                summary.sent += 1;
            } else {
                summary.failed += 1;
            }
        }

        tracing::info!(
            %group,
            %period,
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "dispatched timesheet requests"
        );

        Ok(DispatchOutcome::Dispatched(summary))
    }
}
