//! Google Cloud Config

use std::fmt::{Debug, Formatter, Result as FmtResult};

use clap::Args;

/// Google Cloud project, queue, bucket and OAuth settings.
#[derive(Args)]
pub struct GoogleConfig {
    /// Google Cloud project id
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT_ID")]
    pub project_id: String,

    /// Google Cloud location id of the queue and scheduler jobs
    #[arg(long, env = "GOOGLE_CLOUD_LOCATION_ID")]
    pub location_id: String,

    /// Cloud Tasks queue receiving aggregation tasks
    #[arg(long, env = "EMAIL_AGGREGATOR_QUEUE_NAME")]
    pub aggregator_queue: String,

    /// Bucket imported timesheets are stored in
    #[arg(long, env = "TIMESHEETS_BUCKET_NAME")]
    pub bucket: String,

    /// Service account used for OIDC tokens on callbacks
    #[arg(long, env = "SERVICE_ACCOUNT_EMAIL")]
    pub service_account_email: String,

    /// OAuth client id
    #[arg(long, env = "GOOGLE_OAUTH_CLIENT_ID")]
    pub oauth_client_id: String,

    /// OAuth client secret
    #[arg(long, env = "GOOGLE_OAUTH_CLIENT_SECRET", hide_env_values = true)]
    pub oauth_client_secret: String,

    /// OAuth refresh token of the mailbox account
    #[arg(long, env = "GOOGLE_OAUTH_REFRESH_TOKEN", hide_env_values = true)]
    pub oauth_refresh_token: String,

    /// Public base URL of this service
    #[arg(long, env = "APP_URL")]
    pub app_url: String,
}

impl GoogleConfig {
    /// Base URL without a trailing slash.
    #[must_use]
    pub fn app_url(&self) -> &str {
        self.app_url.trim_end_matches('/')
    }
}

impl Debug for GoogleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GoogleConfig")
            .field("project_id", &self.project_id)
            .field("location_id", &self.location_id)
            .field("aggregator_queue", &self.aggregator_queue)
            .field("bucket", &self.bucket)
            .field("service_account_email", &self.service_account_email)
            .field("oauth_client_id", &self.oauth_client_id)
            .field("oauth_client_secret", &"[redacted]")
            .field("oauth_refresh_token", &"[redacted]")
            .field("app_url", &self.app_url)
            .finish()
    }
}
