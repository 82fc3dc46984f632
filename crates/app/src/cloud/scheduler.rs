//! Cloud Scheduler jobs that trigger timesheet requests.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde_json::{Value, json};

use crate::domain::{groups::records::GroupUuid, schedules::Schedule};

use super::{
    auth::GoogleAuth,
    errors::{CloudError, check},
};

const SCHEDULER_API: &str = "https://cloudscheduler.googleapis.com/v1";

#[automock]
#[async_trait]
pub trait RequestScheduler: Send + Sync {
    /// Create the group's request job. An existing job is left as is.
    async fn create_job(&self, group: GroupUuid, schedule: &Schedule) -> Result<(), CloudError>;

    /// Replace the job's cron expression and time zone.
    async fn update_job(&self, group: GroupUuid, schedule: &Schedule) -> Result<(), CloudError>;

    /// Delete the group's job. A missing job is not an error.
    async fn delete_job(&self, group: GroupUuid) -> Result<(), CloudError>;
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub project_id: String,
    pub location_id: String,

    /// Public base URL of this service.
    pub app_url: String,

    pub service_account_email: String,
}

impl SchedulerConfig {
    fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location_id)
    }

    fn job_name(&self, group: GroupUuid) -> String {
        format!(
            "{}/jobs/timesheet-request-scheduler-job-{group}",
            self.parent()
        )
    }

    fn job(&self, group: GroupUuid, schedule: &Schedule) -> Value {
        let audience = format!("{}/timesheets/request", self.app_url);

        json!({
            "name": self.job_name(group),
            "schedule": schedule.cron_expression(),
            "timeZone": schedule.timezone,
            "httpTarget": {
                "uri": format!("{audience}?groupID={group}"),
                "httpMethod": "POST",
                "oidcToken": {
                    "serviceAccountEmail": self.service_account_email,
                    "audience": audience,
                },
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct CloudSchedulerClient {
    http: Client,
    auth: Arc<GoogleAuth>,
    config: SchedulerConfig,
}

impl CloudSchedulerClient {
    #[must_use]
    pub fn new(http: Client, auth: Arc<GoogleAuth>, config: SchedulerConfig) -> Self {
        Self { http, auth, config }
    }
}

#[async_trait]
impl RequestScheduler for CloudSchedulerClient {
    async fn create_job(&self, group: GroupUuid, schedule: &Schedule) -> Result<(), CloudError> {
        let token = self.auth.access_token().await?;
        let url = format!("{SCHEDULER_API}/{}/jobs", self.config.parent());

        let response = self
            .http
            .post(url)
            .bearer_auth(token.as_str())
            .json(&self.config.job(group, schedule))
            .send()
            .await?;

        match check(response, "job create").await {
            Ok(_) => {
                tracing::info!(%group, "created scheduler job");

                Ok(())
            }
            Err(CloudError::AlreadyExists) => Ok(()),
            Err(error) => Err(error),
        }
    }

    async fn update_job(&self, group: GroupUuid, schedule: &Schedule) -> Result<(), CloudError> {
        let token = self.auth.access_token().await?;
        let url = format!(
            "{SCHEDULER_API}/{}?updateMask=schedule,timeZone",
            self.config.job_name(group)
        );

        let response = self
            .http
            .patch(url)
            .bearer_auth(token.as_str())
            .json(&json!({
                "schedule": schedule.cron_expression(),
                "timeZone": schedule.timezone,
            }))
            .send()
            .await?;

        match check(response, "job update").await {
            Ok(_) => {
                tracing::info!(%group, "updated scheduler job");

                Ok(())
            }
            Err(CloudError::NotFound) => self.create_job(group, schedule).await,
            Err(error) => Err(error),
        }
    }

    async fn delete_job(&self, group: GroupUuid) -> Result<(), CloudError> {
        let token = self.auth.access_token().await?;
        let url = format!("{SCHEDULER_API}/{}", self.config.job_name(group));

        let response = self
            .http
            .delete(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        match check(response, "job delete").await {
            Ok(_) => {
                tracing::info!(%group, "deleted scheduler job");

                Ok(())
            }
            Err(CloudError::NotFound) => Ok(()),
            Err(error) => Err(error),
        }
    }
}
