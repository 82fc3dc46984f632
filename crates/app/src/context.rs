//! App Context

use std::sync::Arc;

use reqwest::Client;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    cloud::{
        BlobStore, CloudSchedulerClient, CloudTasksQueue, FirebaseIdentity, GcsBlobStore,
        GmailClient, GoogleAuth, GoogleCredentials, IdentityProvider, RequestScheduler,
        SchedulerConfig, TasksConfig,
    },
    cycle::{
        AggregationService, AggregationTrigger, AttachmentImporter, ImportService,
        RequestDispatchService, RequestDispatcher,
    },
    database::{self, Db},
    domain::{
        contractors::{ContractorsService, PgContractorsService},
        groups::{GroupsService, PgGroupsService},
        owners::{OwnersService, PgOwnersService},
        timesheets::{PgTimesheetsService, TimesheetsService},
    },
    reporting::{ErrorReporter, TracingErrorReporter},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),

    #[error("failed to build http client")]
    Http(#[source] reqwest::Error),
}

/// Settings for the Google services the cycle talks to.
#[derive(Debug, Clone)]
pub struct CloudSettings {
    pub credentials: GoogleCredentials,
    pub tasks: TasksConfig,
    pub scheduler: SchedulerConfig,
    pub bucket: String,

    /// Address request emails are sent from and replies arrive at.
    pub mail_address: String,

    pub firebase_api_key: Zeroizing<String>,
}

#[derive(Clone)]
pub struct AppContext {
    pub owners: Arc<dyn OwnersService>,
    pub groups: Arc<dyn GroupsService>,
    pub contractors: Arc<dyn ContractorsService>,
    pub timesheets: Arc<dyn TimesheetsService>,
    pub scheduler: Arc<dyn RequestScheduler>,
    pub blobs: Arc<dyn BlobStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub requests: Arc<dyn RequestDispatchService>,
    pub aggregation: Arc<dyn AggregationService>,
    pub importer: Arc<dyn ImportService>,
    pub reporter: Arc<dyn ErrorReporter>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database, apply migrations and wire up collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or building the HTTP
    /// client fails.
    pub async fn from_config(
        database_url: &str,
        settings: CloudSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(database_url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let db = Db::new(pool);

        let http = Client::builder()
            .user_agent(concat!("jobsender/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppInitError::Http)?;

        let auth = Arc::new(GoogleAuth::new(http.clone(), settings.credentials));
        let gmail = Arc::new(GmailClient::new(http.clone(), auth.clone()));

        let owners: Arc<dyn OwnersService> = Arc::new(PgOwnersService::new(db.clone()));
        let groups: Arc<dyn GroupsService> = Arc::new(PgGroupsService::new(db.clone()));
        let contractors: Arc<dyn ContractorsService> =
            Arc::new(PgContractorsService::new(db.clone()));
        let timesheets: Arc<dyn TimesheetsService> = Arc::new(PgTimesheetsService::new(db));

        let blobs: Arc<dyn BlobStore> = Arc::new(GcsBlobStore::new(
            http.clone(),
            auth.clone(),
            settings.bucket,
        ));
        let reporter: Arc<dyn ErrorReporter> = Arc::new(TracingErrorReporter);

        Ok(Self {
            scheduler: Arc::new(CloudSchedulerClient::new(
                http.clone(),
                auth.clone(),
                settings.scheduler,
            )),
            identity: Arc::new(FirebaseIdentity::new(http.clone(), settings.firebase_api_key)),
            requests: Arc::new(RequestDispatcher::new(
                groups.clone(),
                contractors.clone(),
                gmail.clone(),
                reporter.clone(),
                settings.mail_address,
            )),
            aggregation: Arc::new(AggregationTrigger::new(
                contractors.clone(),
                Arc::new(CloudTasksQueue::new(http, auth, settings.tasks)),
                reporter.clone(),
            )),
            importer: Arc::new(AttachmentImporter::new(
                contractors.clone(),
                timesheets.clone(),
                gmail,
                blobs.clone(),
                reporter.clone(),
            )),
            owners,
            groups,
            contractors,
            timesheets,
            blobs,
            reporter,
        })
    }
}
