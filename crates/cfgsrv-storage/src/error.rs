//! Storage error taxonomy.
//!
//! Every backend fault is reported as one of three kinds. Callers (and the
//! transport layer) match on the kind; the payload is context for logs.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// An insert (or a rename) collided with an existing id.
    #[error("duplicate data: {collection}/{id}")]
    DuplicateData { collection: &'static str, id: String },

    /// The record is missing, or reading/decoding it failed.
    #[error("cannot get the data: {reason}")]
    CannotGetData { reason: String },

    /// Any other storage fault.
    #[error("unknown error: {reason}")]
    UnknownError { reason: String },
}

impl StorageError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StorageError::CannotGetData {
            reason: format!("no document {}/{}", collection, id),
        }
    }

    pub fn unknown(err: impl std::fmt::Display) -> Self {
        StorageError::UnknownError {
            reason: err.to_string(),
        }
    }

    pub fn unreadable(err: impl std::fmt::Display) -> Self {
        StorageError::CannotGetData {
            reason: err.to_string(),
        }
    }
}
