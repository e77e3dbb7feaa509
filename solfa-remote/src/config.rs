//! Remote endpoint configuration.

use serde::{Deserialize, Serialize};

/// Environment variable holding the remote endpoint base URL.
pub const ENDPOINT_VAR: &str = "SOLFA_SYNC_URL";
/// Environment variable holding the remote access token.
pub const TOKEN_VAR: &str = "SOLFA_SYNC_TOKEN";

/// The two values that gate whether remote sync is active at all.
///
/// When either is missing the application runs local-only; absence of
/// configuration is a supported mode, never a startup failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the progress service.
    pub endpoint_url: String,
    /// Bearer token sent with every request.
    pub access_token: String,
}

impl RemoteConfig {
    /// Reads the configuration from the environment.
    ///
    /// Returns `None` (local-only mode) unless both variables are set
    /// and non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let endpoint_url = std::env::var(ENDPOINT_VAR).ok().filter(|v| !v.is_empty())?;
        let access_token = std::env::var(TOKEN_VAR).ok().filter(|v| !v.is_empty())?;
        Some(Self {
            endpoint_url,
            access_token,
        })
    }
}
