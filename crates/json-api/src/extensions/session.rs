//! Session depot helpers.

use salvo::prelude::{Depot, StatusError};

use jobsender_app::cloud::SessionData;

const SESSION_DEPOT_KEY: &str = "session";

/// Access to the caller resolved by the auth middleware.
pub(crate) trait SessionExt {
    fn insert_session(&mut self, session: SessionData);

    fn session_or_401(&self) -> Result<&SessionData, StatusError>;
}

impl SessionExt for Depot {
    fn insert_session(&mut self, session: SessionData) {
        self.insert(SESSION_DEPOT_KEY, session);
    }

    fn session_or_401(&self) -> Result<&SessionData, StatusError> {
        self.get::<SessionData>(SESSION_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
