//! Mail Config

use clap::Args;

/// Mailbox settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Address request emails are sent from and timesheets are replied to
    #[arg(long = "mail-address", env = "EMAIL_SERVICE_EMAIL")]
    pub address: String,
}
