//! Attachment import.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;

use crate::{
    cloud::{
        CloudError,
        mail::{Mailbox, MessageId},
        storage::{Blob, BlobStore},
    },
    cycle::{
        aggregation::AggregationTask,
        attachments::{Attachment, extract_attachments},
        request_subject,
    },
    domain::{
        contractors::{
            ContractorChange, ContractorsService, ContractorsServiceError,
            records::ContractorRecord,
        },
        schedules::period::MalformedRequestId,
        timesheets::{
            TimesheetsService, TimesheetsServiceError, data::NewTimesheet,
            records::TimesheetUuid,
        },
    },
    reporting::{ErrorReport, ErrorReporter},
};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("contractor not found")]
    ContractorNotFound,

    #[error("contractor does not belong to the group")]
    GroupMismatch,

    #[error(transparent)]
    MalformedRequestId(#[from] MalformedRequestId),

    #[error("failed to load contractor")]
    Contractors(#[source] ContractorsServiceError),

    #[error("failed to search the mailbox")]
    Mailbox(#[from] CloudError),
}

impl From<ContractorsServiceError> for ImportError {
    fn from(error: ContractorsServiceError) -> Self {
        match error {
            ContractorsServiceError::NotFound => Self::ContractorNotFound,
            other => Self::Contractors(other),
        }
    }
}

/// Counts for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Unread messages carrying the request subject.
    pub matched: usize,

    /// Attachments stored as timesheets.
    pub imported: usize,

    /// Messages fully processed and archived.
    pub archived: usize,

    /// Messages abandoned after a reported failure.
    pub failed: usize,
}

#[derive(Debug, Error)]
enum MessageError {
    #[error("failed to fetch message {0}")]
    Fetch(MessageId, #[source] CloudError),

    #[error("failed to upload {0}")]
    Upload(String, #[source] CloudError),

    #[error("failed to record timesheet")]
    Record(#[source] TimesheetsServiceError),

    #[error("failed to mark the request fulfilled")]
    Fulfil(#[source] ContractorsServiceError),

    #[error("failed to archive message {0}")]
    Archive(MessageId, #[source] CloudError),
}

#[automock]
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Import emailed timesheets for the contractor and period in `task`.
    async fn import_for_period(
        &self,
        task: &AggregationTask,
        now: Timestamp,
    ) -> Result<ImportSummary, ImportError>;
}

pub struct AttachmentImporter {
    contractors: Arc<dyn ContractorsService>,
    timesheets: Arc<dyn TimesheetsService>,
    mailbox: Arc<dyn Mailbox>,
    blobs: Arc<dyn BlobStore>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Debug for AttachmentImporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AttachmentImporter").finish_non_exhaustive()
    }
}

impl AttachmentImporter {
    #[must_use]
    pub fn new(
        contractors: Arc<dyn ContractorsService>,
        timesheets: Arc<dyn TimesheetsService>,
        mailbox: Arc<dyn Mailbox>,
        blobs: Arc<dyn BlobStore>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            contractors,
            timesheets,
            mailbox,
            blobs,
            reporter,
        }
    }

    /// Store one attachment and record it as the period's timesheet.
    async fn store(
        &self,
        contractor: &ContractorRecord,
        task: &AggregationTask,
        attachment: Attachment,
    ) -> Result<(), MessageError> {
        let key = format!(
            "{}/{}-{}_{}{}",
            contractor.group_uuid,
            contractor.name,
            contractor.surname,
            task.request_id,
            attachment.extension()
        );

        let blob = Blob {
            key: key.clone(),
            content_type: attachment.content_type,
            data: attachment.data,
            metadata: vec![
                ("request_id".to_string(), task.request_id.to_string()),
                ("contractor_id".to_string(), contractor.uuid.to_string()),
            ],
        };

        let storage_url = self
            .blobs
            .upload(blob)
            .await
            .map_err(|error| MessageError::Upload(key, error))?;

        self.timesheets
            .record_timesheet(NewTimesheet {
                uuid: TimesheetUuid::new(),
                contractor_uuid: contractor.uuid,
                request_id: task.request_id.clone(),
                storage_url,
            })
            .await
            .map_err(MessageError::Record)?;

        Ok(())
    }

    /// Import one message. Returns how many attachments were stored, or
    /// `None` when the message carried none and was left untouched.
    async fn import_message(
        &self,
        contractor: &ContractorRecord,
        task: &AggregationTask,
        message: &MessageId,
        now: Timestamp,
    ) -> Result<Option<usize>, MessageError> {
        let root = self
            .mailbox
            .fetch_message(message)
            .await
            .map_err(|error| MessageError::Fetch(message.clone(), error))?;

        let attachments = extract_attachments(&root);

        if attachments.is_empty() {
            tracing::debug!(%message, "message has no attachments");

            return Ok(None);
        }

        let count = attachments.len();

        for attachment in attachments {
            self.store(contractor, task, attachment).await?;
        }

        self.contractors
            .apply_change(
                contractor.uuid,
                ContractorChange::MarkFulfilled {
                    request: task.request_id.clone(),
                    at: now,
                },
            )
            .await
            .map_err(MessageError::Fulfil)?;

        self.mailbox
            .archive(message)
            .await
            .map_err(|error| MessageError::Archive(message.clone(), error))?;

        Ok(Some(count))
    }
}

#[async_trait]
impl ImportService for AttachmentImporter {
    async fn import_for_period(
        &self,
        task: &AggregationTask,
        now: Timestamp,
    ) -> Result<ImportSummary, ImportError> {
        let contractor = self.contractors.get_contractor(task.contractor_uuid).await?;

        if contractor.group_uuid != task.group_uuid {
            return Err(ImportError::GroupMismatch);
        }

        let period = task.request_id.period()?;
        let subject = request_subject(period, contractor.uuid);
        let messages = self.mailbox.search(&subject).await?;

        let mut summary = ImportSummary {
            matched: messages.len(),
            ..ImportSummary::default()
        };

        for message in &messages {
            match self.import_message(&contractor, task, message, now).await {
                Ok(Some(count)) => {
                    summary.imported += count;
                    summary.archived += 1;
                }
                Ok(None) => {}
                Err(error) => {
                    summary.failed += 1;

                    self.reporter
                        .report(ErrorReport::new("import", &error))
                        .await;
                }
            }
        }

        tracing::info!(
            contractor = %contractor.uuid,
            request = %task.request_id,
            matched = summary.matched,
            imported = summary.imported,
            failed = summary.failed,
            "imported timesheets"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        cloud::{
            mail::{MimePart, MockMailbox},
            storage::MockBlobStore,
        },
        domain::{
            contractors::{MockContractorsService, records::LastRequest},
            groups::records::GroupUuid,
            schedules::RequestId,
            timesheets::MockTimesheetsService,
        },
        reporting::MockErrorReporter,
        test::{
            fakes::{
                InMemoryBlobStore, InMemoryContractors, InMemoryMailbox, InMemoryTimesheets,
                RecordingReporter,
            },
            helpers::contractor_record,
        },
    };

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_second(1_717_000_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    fn requested_contractor() -> ContractorRecord {
        let mut contractor = contractor_record();

        contractor.last_requests = vec![LastRequest::pending(RequestId::new("21_22-2024"))];

        contractor
    }

    fn task_for(contractor: &ContractorRecord) -> AggregationTask {
        AggregationTask {
            group_uuid: contractor.group_uuid,
            contractor_uuid: contractor.uuid,
            request_id: RequestId::new("21_22-2024"),
        }
    }

    fn reply_with_pdf(data: &[u8]) -> MimePart {
        MimePart {
            mime_type: "multipart/mixed".to_string(),
            parts: vec![
                MimePart {
                    mime_type: "text/plain".to_string(),
                    body: b"attached".to_vec(),
                    ..MimePart::default()
                },
                MimePart {
                    mime_type: "application/pdf".to_string(),
                    headers: vec![(
                        "Content-Disposition".to_string(),
                        "attachment; filename=\"may.pdf\"".to_string(),
                    )],
                    body: data.to_vec(),
                    parts: Vec::new(),
                },
            ],
            ..MimePart::default()
        }
    }

    struct Harness {
        contractors: Arc<InMemoryContractors>,
        timesheets: Arc<InMemoryTimesheets>,
        mailbox: Arc<InMemoryMailbox>,
        blobs: Arc<InMemoryBlobStore>,
        reporter: Arc<RecordingReporter>,
    }

    impl Harness {
        fn new(contractor: &ContractorRecord) -> Self {
            Self {
                contractors: Arc::new(InMemoryContractors::with([contractor.clone()])),
                timesheets: Arc::new(InMemoryTimesheets::default()),
                mailbox: Arc::new(InMemoryMailbox::default()),
                blobs: Arc::new(InMemoryBlobStore::default()),
                reporter: Arc::new(RecordingReporter::default()),
            }
        }

        fn importer(&self) -> AttachmentImporter {
            AttachmentImporter::new(
                self.contractors.clone(),
                self.timesheets.clone(),
                self.mailbox.clone(),
                self.blobs.clone(),
                self.reporter.clone(),
            )
        }
    }

    #[tokio::test]
    async fn import_round_trip_stores_bytes_and_fulfils_the_request() -> TestResult {
        let contractor = requested_contractor();
        let harness = Harness::new(&contractor);
        let subject = format!("Re: Timesheet 21/22 2024 [{}]", contractor.uuid);
        let message = harness
            .mailbox
            .deliver(&subject, reply_with_pdf(b"%PDF-1.7 hours"))
            .await;

        let summary = harness
            .importer()
            .import_for_period(&task_for(&contractor), now())
            .await?;

        assert_eq!(
            summary,
            ImportSummary {
                matched: 1,
                imported: 1,
                archived: 1,
                failed: 0,
            }
        );

        let timesheets = harness.timesheets.all().await;
        let timesheet = timesheets.first().ok_or("timesheet missing")?;

        assert_eq!(timesheets.len(), 1);
        assert_eq!(timesheet.request_id, RequestId::new("21_22-2024"));
        assert_eq!(
            harness.blobs.fetch(&timesheet.storage_url).await,
            Some(b"%PDF-1.7 hours".to_vec())
        );

        let blob = harness
            .blobs
            .blob(&format!("{}/Jane-Doe_21_22-2024.pdf", contractor.group_uuid))
            .await
            .ok_or("blob missing")?;

        assert_eq!(
            blob.metadata,
            vec![
                ("request_id".to_string(), "21_22-2024".to_string()),
                ("contractor_id".to_string(), contractor.uuid.to_string()),
            ]
        );

        let stored = harness
            .contractors
            .get(contractor.uuid)
            .await
            .ok_or("contractor missing")?;

        assert_eq!(
            stored.last_requests,
            vec![LastRequest {
                id: RequestId::new("21_22-2024"),
                fulfilled_at: Some(now()),
            }]
        );
        assert_eq!(harness.mailbox.archived().await, vec![message]);

        Ok(())
    }

    #[tokio::test]
    async fn no_matching_message_writes_nothing() -> TestResult {
        let contractor = requested_contractor();
        let mut mailbox = MockMailbox::new();

        mailbox.expect_search().times(1).returning(|_| Ok(Vec::new()));

        let mut contractors = MockContractorsService::new();
        let loaded = contractor.clone();

        contractors
            .expect_get_contractor()
            .times(1)
            .returning(move |_| Ok(loaded.clone()));

        let importer = AttachmentImporter::new(
            Arc::new(contractors),
            Arc::new(MockTimesheetsService::new()),
            Arc::new(mailbox),
            Arc::new(MockBlobStore::new()),
            Arc::new(MockErrorReporter::new()),
        );

        let summary = importer.import_for_period(&task_for(&contractor), now()).await?;

        assert_eq!(summary, ImportSummary::default());

        Ok(())
    }

    #[tokio::test]
    async fn failed_message_is_reported_and_left_matchable() -> TestResult {
        let contractor = requested_contractor();
        let harness = Harness::new(&contractor);
        let subject = format!("Timesheet 21/22 2024 [{}]", contractor.uuid);

        harness.blobs.fail_uploads().await;
        harness.mailbox.deliver(&subject, reply_with_pdf(b"%PDF")).await;

        let summary = harness
            .importer()
            .import_for_period(&task_for(&contractor), now())
            .await?;

        assert_eq!(summary.failed, 1);
        assert_eq!(harness.reporter.reports().await.len(), 1);
        assert!(harness.mailbox.archived().await.is_empty());
        assert!(harness.timesheets.all().await.is_empty());
        assert_eq!(harness.mailbox.search(&subject).await?.len(), 1);

        let stored = harness
            .contractors
            .get(contractor.uuid)
            .await
            .ok_or("contractor missing")?;

        assert_eq!(stored.last_requests, contractor.last_requests);

        Ok(())
    }

    #[tokio::test]
    async fn messages_without_attachments_are_left_untouched() -> TestResult {
        let contractor = requested_contractor();
        let harness = Harness::new(&contractor);
        let subject = format!("Timesheet 21/22 2024 [{}]", contractor.uuid);

        harness
            .mailbox
            .deliver(
                &subject,
                MimePart {
                    mime_type: "text/plain".to_string(),
                    body: b"will send tomorrow".to_vec(),
                    ..MimePart::default()
                },
            )
            .await;

        let summary = harness
            .importer()
            .import_for_period(&task_for(&contractor), now())
            .await?;

        assert_eq!(
            summary,
            ImportSummary {
                matched: 1,
                ..ImportSummary::default()
            }
        );
        assert!(harness.mailbox.archived().await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn contractor_from_another_group_is_rejected() {
        let contractor = requested_contractor();
        let harness = Harness::new(&contractor);

        let mut task = task_for(&contractor);
        task.group_uuid = GroupUuid::new();

        let result = harness.importer().import_for_period(&task, now()).await;

        assert!(
            matches!(result, Err(ImportError::GroupMismatch)),
            "expected GroupMismatch, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_request_id_is_rejected_before_searching() {
        let contractor = requested_contractor();
        let harness = Harness::new(&contractor);

        let mut task = task_for(&contractor);
        task.request_id = RequestId::new("21/22 2024");

        let result = harness.importer().import_for_period(&task, now()).await;

        assert!(
            matches!(result, Err(ImportError::MalformedRequestId(_))),
            "expected MalformedRequestId, got {result:?}"
        );
    }
}
