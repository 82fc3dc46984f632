//! Mailbox and mail sending capabilities.

use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;
use mockall::automock;

use super::errors::CloudError;

/// Provider identifier of a stored message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// One node of a message's MIME tree with its decoded body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MimePart {
    pub mime_type: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub parts: Vec<MimePart>,
}

impl MimePart {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A plain-text message to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    /// Render as an RFC 5322 message.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidData`] when a header value contains a
    /// line break.
    pub fn to_rfc5322(&self) -> Result<String, CloudError> {
        for (name, value) in [("From", &self.from), ("To", &self.to), ("Subject", &self.subject)] {
            if value.contains(['\r', '\n']) {
                return Err(CloudError::InvalidData(format!(
                    "line break in {name} header"
                )));
            }
        }

        Ok(format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}",
            self.from, self.to, self.subject, self.body
        ))
    }
}

#[automock]
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// Unread messages whose subject contains `subject`.
    async fn search(&self, subject: &str) -> Result<Vec<MessageId>, CloudError>;

    /// Fetch a message's full MIME tree.
    async fn fetch_message(&self, message: &MessageId) -> Result<MimePart, CloudError>;

    /// Permanently remove a consumed message.
    async fn archive(&self, message: &MessageId) -> Result<(), CloudError>;
}

#[automock]
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), CloudError>;
}
