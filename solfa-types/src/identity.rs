//! Anonymous identity token.
//!
//! One token per device install, generated once and persisted
//! indefinitely. The token is the primary key for the remote progress
//! record, so it must stay stable for the lifetime of local storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The anonymous per-device identity token.
///
/// Stored as the raw string rather than a parsed UUID so that tokens
/// written by older builds round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity from an existing token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Creates an identity from a UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Generates a fresh random identity (UUID v4).
    #[must_use]
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the token parses as a UUID.
    #[must_use]
    pub fn is_uuid_shaped(&self) -> bool {
        Uuid::parse_str(&self.0).is_ok()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for Identity {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}
