//! Cloud collaborator errors.

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Errors that can occur when talking to a Google API.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("resource not found")]
    NotFound,

    #[error("resource already exists")]
    AlreadyExists,

    #[error("credentials were rejected")]
    Unauthenticated,

    /// An HTTP transport or serialization error occurred.
    #[error("http error")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx response or an unexpected body.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Pass successful responses through and classify the rest.
pub(crate) async fn check(response: Response, operation: &str) -> Result<Response, CloudError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(CloudError::NotFound),
        StatusCode::CONFLICT => Err(CloudError::AlreadyExists),
        StatusCode::UNAUTHORIZED => Err(CloudError::Unauthenticated),
        _ => {
            let text = response.text().await.unwrap_or_default();

            Err(CloudError::UnexpectedResponse(format!(
                "{operation} failed with status {status}: {text}"
            )))
        }
    }
}
