//! Cloud Tasks queue.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mockall::automock;
use reqwest::Client;
use serde_json::{Value, json};

use super::{
    auth::GoogleAuth,
    errors::{CloudError, check},
};

const TASKS_API: &str = "https://cloudtasks.googleapis.com/v2";

/// A named HTTP task carrying a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedTask {
    pub name: String,
    pub body: Vec<u8>,
}

#[automock]
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Enqueue a task. Returns `false` when a task with that name already exists.
    async fn enqueue(&self, task: QueuedTask) -> Result<bool, CloudError>;
}

#[derive(Debug, Clone)]
pub struct TasksConfig {
    pub project_id: String,
    pub location_id: String,
    pub queue: String,

    /// URL every task is delivered to.
    pub target_url: String,

    /// Identity the OIDC token is minted for.
    pub service_account_email: String,
}

impl TasksConfig {
    fn queue_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/queues/{}",
            self.project_id, self.location_id, self.queue
        )
    }

    fn create_request(&self, task: &QueuedTask) -> Value {
        json!({
            "task": {
                "name": format!("{}/tasks/{}", self.queue_path(), task.name),
                "httpRequest": {
                    "httpMethod": "POST",
                    "url": self.target_url,
                    "headers": { "Content-Type": "application/json" },
                    "body": BASE64.encode(&task.body),
                    "oidcToken": {
                        "serviceAccountEmail": self.service_account_email,
                        "audience": self.target_url,
                    },
                },
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct CloudTasksQueue {
    http: Client,
    auth: Arc<GoogleAuth>,
    config: TasksConfig,
}

impl CloudTasksQueue {
    #[must_use]
    pub fn new(http: Client, auth: Arc<GoogleAuth>, config: TasksConfig) -> Self {
        Self { http, auth, config }
    }
}

#[async_trait]
impl TaskQueue for CloudTasksQueue {
    async fn enqueue(&self, task: QueuedTask) -> Result<bool, CloudError> {
        let token = self.auth.access_token().await?;
        let url = format!("{TASKS_API}/{}/tasks", self.config.queue_path());

        let response = self
            .http
            .post(url)
            .bearer_auth(token.as_str())
            .json(&self.config.create_request(&task))
            .send()
            .await?;

        match check(response, "task create").await {
            Ok(_) => {
                tracing::info!(task = %task.name, "enqueued task");

                Ok(true)
            }
            Err(CloudError::AlreadyExists) => {
                tracing::debug!(task = %task.name, "task already exists");

                Ok(false)
            }
            Err(error) => Err(error),
        }
    }
}
