//! Google Cloud collaborators.
//!
//! Each external service sits behind a small capability trait with a single
//! REST implementation built on `reqwest`.

pub mod auth;
pub mod errors;
pub mod gmail;
pub mod identity;
pub mod mail;
pub mod scheduler;
pub mod storage;
pub mod tasks;

pub use auth::{GoogleAuth, GoogleCredentials};
pub use errors::CloudError;
pub use gmail::GmailClient;
pub use identity::{FirebaseIdentity, IdentityProvider, SessionData};
pub use mail::{MailSender, Mailbox, MessageId, MimePart, OutgoingEmail};
pub use scheduler::{CloudSchedulerClient, RequestScheduler, SchedulerConfig};
pub use storage::{Blob, BlobStore, GcsBlobStore};
pub use tasks::{CloudTasksQueue, QueuedTask, TaskQueue, TasksConfig};
