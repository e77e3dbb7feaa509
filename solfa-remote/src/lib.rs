//! Remote progress store client.
//!
//! The remote side is an opaque key-value-by-identity service: one
//! record per identity, mirroring the progress document 1:1, with
//! insert-or-replace upsert semantics. This crate defines the narrow
//! [`RemoteStore`] interface plus the HTTP implementation.
//!
//! "Record not found" is an expected first-run outcome, surfaced as
//! `Ok(None)` rather than an error. Real failures (network, remote
//! errors) are reported to the caller; deciding that sync is advisory
//! happens one layer up, in the engine.

mod config;
mod error;
mod http;

pub use config::{RemoteConfig, ENDPOINT_VAR, TOKEN_VAR};
pub use error::{RemoteError, RemoteResult};
pub use http::HttpRemoteStore;

use async_trait::async_trait;
use solfa_types::{Identity, ProgressDocument};

/// The opaque remote store, keyed by identity.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Loads the progress record for `identity`.
    ///
    /// `Ok(None)` means no record exists yet (a brand-new identity,
    /// not an error).
    async fn load(&self, identity: &Identity) -> RemoteResult<Option<ProgressDocument>>;

    /// Inserts or fully replaces the record for `identity`.
    async fn upsert(&self, identity: &Identity, document: &ProgressDocument) -> RemoteResult<()>;
}
