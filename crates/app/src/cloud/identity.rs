//! Identity provider sessions.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::owners::records::OwnerId;

use super::errors::{CloudError, check};

const LOOKUP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";

/// A validated caller.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionData {
    pub token: Zeroizing<String>,
    pub email: String,
    pub is_verified: bool,
    pub owner_id: OwnerId,
}

impl Debug for SessionData {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SessionData")
            .field("token", &"[redacted]")
            .field("email", &self.email)
            .field("is_verified", &self.is_verified)
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve an ID token to the account it was issued for.
    ///
    /// Rejected tokens yield [`CloudError::Unauthenticated`].
    async fn authenticate(&self, token: &str) -> Result<SessionData, CloudError>;
}

/// Firebase Authentication via the Identity Toolkit REST API.
pub struct FirebaseIdentity {
    http: Client,
    api_key: Zeroizing<String>,
}

impl Debug for FirebaseIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FirebaseIdentity").finish_non_exhaustive()
    }
}

impl FirebaseIdentity {
    #[must_use]
    pub fn new(http: Client, api_key: Zeroizing<String>) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn authenticate(&self, token: &str) -> Result<SessionData, CloudError> {
        let response = self
            .http
            .post(LOOKUP_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "idToken": token }))
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Err(CloudError::Unauthenticated);
        }

        let lookup: LookupResponse = check(response, "account lookup").await?.json().await?;

        lookup.into_session(token)
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: bool,
}

impl LookupResponse {
    fn into_session(self, token: &str) -> Result<SessionData, CloudError> {
        let user = self
            .users
            .into_iter()
            .next()
            .ok_or(CloudError::Unauthenticated)?;

        Ok(SessionData {
            token: Zeroizing::new(token.to_string()),
            email: user.email,
            is_verified: user.email_verified,
            owner_id: OwnerId::new(user.local_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn lookup_maps_first_user_to_session() -> TestResult {
        let lookup: LookupResponse = serde_json::from_value(json!({
            "kind": "identitytoolkit#GetAccountInfoResponse",
            "users": [{
                "localId": "uid-1",
                "email": "owner@example.com",
                "emailVerified": true
            }]
        }))?;

        let session = lookup.into_session("token-1")?;

        assert_eq!(session.owner_id, OwnerId::new("uid-1"));
        assert_eq!(session.email, "owner@example.com");
        assert!(session.is_verified);
        assert_eq!(session.token.as_str(), "token-1");

        Ok(())
    }

    #[test]
    fn lookup_without_users_is_unauthenticated() -> TestResult {
        let lookup: LookupResponse = serde_json::from_value(json!({}))?;

        assert!(matches!(
            lookup.into_session("token-1"),
            Err(CloudError::Unauthenticated)
        ));

        Ok(())
    }

    #[test]
    fn session_debug_hides_token() {
        let session = SessionData {
            token: Zeroizing::new("secret-token".to_string()),
            email: "owner@example.com".to_string(),
            is_verified: false,
            owner_id: OwnerId::new("uid-1"),
        };

        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
