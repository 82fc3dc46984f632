//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Access to the shared state injected by the router.
pub(crate) trait DepotExt {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_ignored| {
            error!("handler state missing from depot");

            StatusError::internal_server_error()
        })
    }
}
