//! Identity Config

use std::fmt::{Debug, Formatter, Result as FmtResult};

use clap::Args;

/// Identity provider settings.
#[derive(Args)]
pub struct IdentityConfig {
    /// Firebase web API key used to look up ID tokens
    #[arg(long, env = "FIREBASE_WEB_API_KEY", hide_env_values = true)]
    pub firebase_api_key: String,
}

impl Debug for IdentityConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("IdentityConfig")
            .field("firebase_api_key", &"[redacted]")
            .finish()
    }
}
