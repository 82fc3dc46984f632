//! Server configuration module

use clap::Parser;
use zeroize::Zeroizing;

use jobsender_app::{
    cloud::{GoogleCredentials, SchedulerConfig, TasksConfig},
    context::CloudSettings,
};

use crate::config::{
    google::GoogleConfig,
    identity::IdentityConfig,
    logging::LoggingConfig,
    mail::MailConfig,
    observability::ObservabilityConfig,
    runtime::RuntimeConfig,
};

pub(crate) mod google;
pub(crate) mod identity;
pub(crate) mod logging;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod runtime;

/// Job Sender JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "jobsender-json", about = "Job Sender JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Listener and database settings.
    #[command(flatten)]
    pub runtime: RuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Google Cloud project and OAuth settings.
    #[command(flatten)]
    pub google: GoogleConfig,

    /// Mailbox settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.runtime.host, self.runtime.port)
    }

    /// Settings for the Google collaborators of the app context.
    #[must_use]
    pub fn cloud_settings(&self) -> CloudSettings {
        let google = &self.google;

        CloudSettings {
            credentials: GoogleCredentials {
                client_id: google.oauth_client_id.clone(),
                client_secret: Zeroizing::new(google.oauth_client_secret.clone()),
                refresh_token: Zeroizing::new(google.oauth_refresh_token.clone()),
            },
            tasks: TasksConfig {
                project_id: google.project_id.clone(),
                location_id: google.location_id.clone(),
                queue: google.aggregator_queue.clone(),
                target_url: format!("{}/timesheets/aggregate", google.app_url()),
                service_account_email: google.service_account_email.clone(),
            },
            scheduler: SchedulerConfig {
                project_id: google.project_id.clone(),
                location_id: google.location_id.clone(),
                app_url: google.app_url().to_string(),
                service_account_email: google.service_account_email.clone(),
            },
            bucket: google.bucket.clone(),
            mail_address: self.mail.address.clone(),
            firebase_api_key: Zeroizing::new(self.identity.firebase_api_key.clone()),
        }
    }
}
