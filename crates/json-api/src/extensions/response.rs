//! Response helper extensions.

use salvo::{
    http::{StatusCode, header::LOCATION},
    prelude::{Response, StatusError},
};
use tracing::error;

/// Marks a response as having created the resource at `location`.
pub(crate) trait CreatedExt {
    fn created_at(&mut self, location: impl Into<String>) -> Result<(), StatusError>;
}

impl CreatedExt for Response {
    fn created_at(&mut self, location: impl Into<String>) -> Result<(), StatusError> {
        self.add_header(LOCATION, location.into(), true).map_err(|source| {
            error!("failed to set location header: {source}");

            StatusError::internal_server_error()
        })?;

        self.status_code(StatusCode::CREATED);

        Ok(())
    }
}
