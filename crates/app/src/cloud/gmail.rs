//! Gmail REST client.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE},
};
use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

use super::{
    auth::GoogleAuth,
    errors::{CloudError, check},
    mail::{MailSender, Mailbox, MessageId, MimePart, OutgoingEmail},
};

const GMAIL_API: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Gmail emits URL-safe base64 with or without padding.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reads and sends mail as the service mailbox.
#[derive(Debug, Clone)]
pub struct GmailClient {
    http: Client,
    auth: Arc<GoogleAuth>,
}

impl GmailClient {
    #[must_use]
    pub fn new(http: Client, auth: Arc<GoogleAuth>) -> Self {
        Self { http, auth }
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, operation: &str) -> Result<T, CloudError> {
        let token = self.auth.access_token().await?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        Ok(check(response, operation).await?.json().await?)
    }

    async fn fetch_attachment(
        &self,
        message: &MessageId,
        attachment: &str,
    ) -> Result<Vec<u8>, CloudError> {
        let url = endpoint(&["messages", message.as_str(), "attachments", attachment])?;
        let body: GmailBody = self.get(url, "attachment fetch").await?;

        decode_body(body.data.as_deref().unwrap_or_default())
    }
}

#[async_trait]
impl Mailbox for GmailClient {
    async fn search(&self, subject: &str) -> Result<Vec<MessageId>, CloudError> {
        let query = search_query(subject);
        let mut messages = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = endpoint(&["messages"])?;

            url.query_pairs_mut().append_pair("q", &query);

            if let Some(token) = page_token.as_deref() {
                url.query_pairs_mut().append_pair("pageToken", token);
            }

            let page: MessageList = self.get(url, "message search").await?;

            messages.extend(page.messages.into_iter().map(|message| MessageId::new(message.id)));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(%query, found = messages.len(), "searched mailbox");

        Ok(messages)
    }

    async fn fetch_message(&self, message: &MessageId) -> Result<MimePart, CloudError> {
        let mut url = endpoint(&["messages", message.as_str()])?;

        url.query_pairs_mut().append_pair("format", "full");

        let fetched: GmailMessage = self.get(url, "message fetch").await?;

        let mut pending = Vec::new();
        let mut root = fetched.payload.into_mime(&mut Vec::new(), &mut pending)?;

        for (path, attachment) in pending {
            let data = self.fetch_attachment(message, &attachment).await?;

            if let Some(part) = part_at_mut(&mut root, &path) {
                part.body = data;
            }
        }

        Ok(root)
    }

    async fn archive(&self, message: &MessageId) -> Result<(), CloudError> {
        let token = self.auth.access_token().await?;
        let url = endpoint(&["messages", message.as_str()])?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        match check(response, "message delete").await {
            Ok(_) | Err(CloudError::NotFound) => Ok(()),
            Err(error) => Err(error),
        }
    }
}

#[async_trait]
impl MailSender for GmailClient {
    async fn send(&self, email: OutgoingEmail) -> Result<(), CloudError> {
        let token = self.auth.access_token().await?;
        let url = endpoint(&["messages", "send"])?;
        let raw = URL_SAFE.encode(email.to_rfc5322()?);

        let response = self
            .http
            .post(url)
            .bearer_auth(token.as_str())
            .json(&json!({ "raw": raw }))
            .send()
            .await?;

        check(response, "message send").await?;

        tracing::debug!(to = %email.to, subject = %email.subject, "sent email");

        Ok(())
    }
}

fn endpoint(segments: &[&str]) -> Result<Url, CloudError> {
    let mut url = Url::parse(GMAIL_API).map_err(|error| CloudError::InvalidData(error.to_string()))?;

    url.path_segments_mut()
        .map_err(|()| CloudError::InvalidData("gmail endpoint cannot be a base".to_string()))?
        .extend(segments);

    Ok(url)
}

fn search_query(subject: &str) -> String {
    format!("subject:\"{}\" is:unread", subject.replace('"', ""))
}

fn decode_body(data: &str) -> Result<Vec<u8>, CloudError> {
    BODY_ENGINE
        .decode(data)
        .map_err(|error| CloudError::InvalidData(error.to_string()))
}

fn part_at_mut<'a>(root: &'a mut MimePart, path: &[usize]) -> Option<&'a mut MimePart> {
    path.iter()
        .try_fold(root, |part, index| part.parts.get_mut(*index))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageRef>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GmailMessage {
    payload: GmailPart,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailPart {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    headers: Vec<GmailHeader>,
    #[serde(default)]
    body: GmailBody,
    #[serde(default)]
    parts: Vec<GmailPart>,
}

#[derive(Debug, Deserialize)]
struct GmailHeader {
    name: String,
    value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailBody {
    attachment_id: Option<String>,
    data: Option<String>,
}

impl GmailPart {
    /// Convert to a [`MimePart`], collecting bodies that must be fetched
    /// separately as `(child index path, attachment id)`.
    fn into_mime(
        self,
        path: &mut Vec<usize>,
        pending: &mut Vec<(Vec<usize>, String)>,
    ) -> Result<MimePart, CloudError> {
        let body = match (self.body.data, self.body.attachment_id) {
            (Some(data), _) => decode_body(&data)?,
            (None, Some(attachment)) => {
                pending.push((path.clone(), attachment));
                Vec::new()
            }
            (None, None) => Vec::new(),
        };

        let mut parts = Vec::with_capacity(self.parts.len());

        for (index, child) in self.parts.into_iter().enumerate() {
            path.push(index);
            parts.push(child.into_mime(path, pending)?);
            path.pop();
        }

        Ok(MimePart {
            mime_type: self.mime_type,
            headers: self
                .headers
                .into_iter()
                .map(|header| (header.name, header.value))
                .collect(),
            body,
            parts,
        })
    }
}
