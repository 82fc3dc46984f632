//! Aggregation trigger.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cloud::tasks::{QueuedTask, TaskQueue},
    domain::{
        contractors::{
            ContractorChange, ContractorsService, ContractorsServiceError,
            records::{ContractorRecord, ContractorUuid},
        },
        groups::records::GroupUuid,
        schedules::RequestId,
    },
    reporting::{ErrorReport, ErrorReporter},
};

/// Payload delivered to the aggregate trigger by the task queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationTask {
    #[serde(rename = "GroupID")]
    pub group_uuid: GroupUuid,

    #[serde(rename = "ContractorID")]
    pub contractor_uuid: ContractorUuid,

    #[serde(rename = "RequestID")]
    pub request_id: RequestId,
}

impl AggregationTask {
    /// Queue-unique task name for an enqueue at `now`.
    #[must_use]
    pub fn task_name(&self, now: Timestamp) -> String {
        format!(
            "timesheet-aggregator-{}-{}-{}",
            self.contractor_uuid,
            self.request_id,
            now.as_second()
        )
    }
}

/// Failures before any task is queued. Per-task failures are reported
/// instead, so one bad request does not hold back the others.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("failed to claim the aggregation window")]
    Claim(#[from] ContractorsServiceError),
}

#[automock]
#[async_trait]
pub trait AggregationService: Send + Sync {
    /// Queue an import for each outstanding request unless one was queued for
    /// this contractor in the last five minutes.
    ///
    /// Returns whether at least one task was created.
    async fn maybe_enqueue_aggregation(
        &self,
        contractor: &ContractorRecord,
        now: Timestamp,
    ) -> Result<bool, AggregationError>;
}

pub struct AggregationTrigger {
    contractors: Arc<dyn ContractorsService>,
    queue: Arc<dyn TaskQueue>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Debug for AggregationTrigger {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AggregationTrigger").finish_non_exhaustive()
    }
}

impl AggregationTrigger {
    #[must_use]
    pub fn new(
        contractors: Arc<dyn ContractorsService>,
        queue: Arc<dyn TaskQueue>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            contractors,
            queue,
            reporter,
        }
    }

    /// Queue one task. Returns whether it was newly created; failures are
    /// reported and count as not created.
    async fn enqueue(&self, task: &AggregationTask, now: Timestamp) -> bool {
        let body = match serde_json::to_vec(task) {
            Ok(body) => body,
            Err(error) => {
                self.reporter
                    .report(ErrorReport::new("aggregation enqueue", &error))
                    .await;

                return false;
            }
        };

        let queued = QueuedTask {
            name: task.task_name(now),
            body,
        };

        match self.queue.enqueue(queued).await {
            Ok(created) => created,
            Err(error) => {
                self.reporter
                    .report(ErrorReport::new("aggregation enqueue", &error))
                    .await;

                false
            }
        }
    }
}

#[async_trait]
impl AggregationService for AggregationTrigger {
    async fn maybe_enqueue_aggregation(
        &self,
        contractor: &ContractorRecord,
        now: Timestamp,
    ) -> Result<bool, AggregationError> {
        if contractor.outstanding_requests().next().is_none() {
            return Ok(false);
        }

        let outcome = self
            .contractors
            .apply_change(contractor.uuid, ContractorChange::ClaimAggregationWindow { now })
            .await?;

        if !outcome.applied {
            tracing::debug!(contractor = %contractor.uuid, "aggregation window still closed");

            return Ok(false);
        }

        let mut created = false;

        for request in outcome.contractor.outstanding_requests() {
            let task = AggregationTask {
                group_uuid: outcome.contractor.group_uuid,
                contractor_uuid: outcome.contractor.uuid,
                request_id: request.id.clone(),
            };

            created |= self.enqueue(&task, now).await;
        }

        Ok(created)
    }
}
