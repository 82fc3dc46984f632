//! Cloud Storage blob store.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Url, header::CACHE_CONTROL, header::CONTENT_TYPE};
use serde::Deserialize;

use super::{
    auth::GoogleAuth,
    errors::{CloudError, check},
};

const STORAGE_HOST: &str = "https://storage.googleapis.com";

/// Stored files never change once written.
const CACHE_CONTROL_VALUE: &str = "public, max-age=86400";

/// An object to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub key: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub metadata: Vec<(String, String)>,
}

#[automock]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a publicly readable object, returning its public URL.
    async fn upload(&self, blob: Blob) -> Result<String, CloudError>;

    /// Delete every object under `prefix`, returning how many were removed.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CloudError>;
}

#[derive(Debug, Clone)]
pub struct GcsBlobStore {
    http: Client,
    auth: Arc<GoogleAuth>,
    bucket: String,
}

impl GcsBlobStore {
    #[must_use]
    pub fn new(http: Client, auth: Arc<GoogleAuth>, bucket: String) -> Self {
        Self { http, auth, bucket }
    }

    /// Public URL of the object stored at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be built.
    pub fn public_url(&self, key: &str) -> Result<Url, CloudError> {
        let mut segments = vec![self.bucket.as_str()];

        segments.extend(key.split('/'));

        url_with_segments(STORAGE_HOST, &segments)
    }

    fn objects_url(&self) -> Result<Url, CloudError> {
        url_with_segments(
            STORAGE_HOST,
            &["storage", "v1", "b", self.bucket.as_str(), "o"],
        )
    }

    async fn list_prefix(&self, prefix: &str) -> Result<Vec<String>, CloudError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.auth.access_token().await?;
            let mut url = self.objects_url()?;

            url.query_pairs_mut()
                .append_pair("prefix", prefix)
                .append_pair("fields", "items(name),nextPageToken");

            if let Some(page) = page_token.as_deref() {
                url.query_pairs_mut().append_pair("pageToken", page);
            }

            let response = self
                .http
                .get(url)
                .bearer_auth(token.as_str())
                .send()
                .await?;

            let page: ObjectList = check(response, "object list").await?.json().await?;

            names.extend(page.items.into_iter().map(|object| object.name));

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(names)
    }
}

#[async_trait]
impl BlobStore for GcsBlobStore {
    async fn upload(&self, blob: Blob) -> Result<String, CloudError> {
        let token = self.auth.access_token().await?;
        let url = self.public_url(&blob.key)?;

        let mut request = self
            .http
            .put(url.clone())
            .bearer_auth(token.as_str())
            .header("x-goog-acl", "public-read")
            .header(CACHE_CONTROL, CACHE_CONTROL_VALUE)
            .header(CONTENT_TYPE, blob.content_type.as_str());

        for (key, value) in &blob.metadata {
            request = request.header(format!("x-goog-meta-{key}"), value.as_str());
        }

        let response = request.body(blob.data).send().await?;

        check(response, "object upload").await?;

        tracing::info!(key = %blob.key, "uploaded blob");

        Ok(url.into())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, CloudError> {
        let names = self.list_prefix(prefix).await?;

        for name in &names {
            let token = self.auth.access_token().await?;
            let mut url = self.objects_url()?;

            url.path_segments_mut()
                .map_err(|()| CloudError::InvalidData("storage url cannot be a base".to_string()))?
                .push(name);

            let response = self
                .http
                .delete(url)
                .bearer_auth(token.as_str())
                .send()
                .await?;

            match check(response, "object delete").await {
                Ok(_) | Err(CloudError::NotFound) => {}
                Err(error) => return Err(error),
            }
        }

        tracing::info!(%prefix, deleted = names.len(), "deleted blobs");

        Ok(names.len())
    }
}

fn url_with_segments(base: &str, segments: &[&str]) -> Result<Url, CloudError> {
    let mut url = Url::parse(base).map_err(|error| CloudError::InvalidData(error.to_string()))?;

    url.path_segments_mut()
        .map_err(|()| CloudError::InvalidData(format!("{base} cannot be a base")))?
        .extend(segments);

    Ok(url)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectRef>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectRef {
    name: String,
}
