//! Core type definitions for the solfa progress engine.
//!
//! This crate defines the serialization boundary of the system:
//! - the anonymous per-device [`Identity`] token
//! - [`ActiveDate`] calendar-date strings
//! - [`LevelCompletion`] records and the [`ProgressDocument`] aggregate
//!
//! Everything here is plain data. Merge rules live in `solfa-merge`,
//! persistence in `solfa-storage`, and the action surface in
//! `solfa-progress`.

mod date;
mod document;
mod identity;
mod level;

pub use date::ActiveDate;
pub use document::ProgressDocument;
pub use identity::Identity;
pub use level::{stars_for, LevelCompletion};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
