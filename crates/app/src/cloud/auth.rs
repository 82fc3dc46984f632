//! Google OAuth access tokens.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jiff::{SignedDuration, Timestamp};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use zeroize::Zeroizing;

use super::errors::{CloudError, check};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Tokens are refreshed this long before Google expires them.
const EXPIRY_MARGIN: SignedDuration = SignedDuration::from_secs(60);

/// OAuth client credentials and the long-lived refresh token.
#[derive(Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
    pub refresh_token: Zeroizing<String>,
}

impl Debug for GoogleCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GoogleCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .finish()
    }
}

struct CachedToken {
    token: Zeroizing<String>,
    expires_at: Timestamp,
}

/// Exchanges the refresh token for access tokens and caches them in process.
pub struct GoogleAuth {
    http: Client,
    credentials: GoogleCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl Debug for GoogleAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GoogleAuth")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl GoogleAuth {
    #[must_use]
    pub fn new(http: Client, credentials: GoogleCredentials) -> Self {
        Self {
            http,
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// A bearer token valid for at least another minute.
    ///
    /// # Errors
    ///
    /// Returns an error when the token exchange fails.
    pub async fn access_token(&self) -> Result<Zeroizing<String>, CloudError> {
        let mut cached = self.cached.lock().await;
        let now = Timestamp::now();

        if let Some(token) = cached.as_ref()
            && token.expires_at > now
        {
            return Ok(token.token.clone());
        }

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", self.credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let parsed: TokenResponse = check(response, "token refresh").await?.json().await?;

        let lifetime = SignedDuration::from_secs(parsed.expires_in).saturating_sub(EXPIRY_MARGIN);

        let expires_at = now
            .checked_add(lifetime)
            .map_err(|error| CloudError::InvalidData(error.to_string()))?;

        let token = Zeroizing::new(parsed.access_token);

        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });

        tracing::debug!(%expires_at, "refreshed google access token");

        Ok(token)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_is_redacted() {
        let credentials = GoogleCredentials {
            client_id: "client".to_string(),
            client_secret: Zeroizing::new("secret".to_string()),
            refresh_token: Zeroizing::new("refresh".to_string()),
        };

        let debug = format!("{credentials:?}");

        assert!(debug.contains("client"), "client id should be visible");
        assert!(!debug.contains("secret\""), "secret leaked: {debug}");
        assert!(!debug.contains("refresh\""), "refresh token leaked: {debug}");
    }
}
