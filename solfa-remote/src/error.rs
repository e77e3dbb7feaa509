//! Error types for the remote client.

use thiserror::Error;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur talking to the remote store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("remote error: status {status}")]
    Status { status: u16 },

    /// The remote record did not parse as a progress document.
    #[error("malformed remote document: {0}")]
    Malformed(#[from] serde_json::Error),
}
