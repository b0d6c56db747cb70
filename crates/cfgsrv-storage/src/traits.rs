//! The [`Repository`] trait defining the storage contract for entities.
//!
//! One trait, generic over the document kind, so a single backend type can
//! serve every collection. All backends (InMemoryStore, SqliteStore) honor
//! the same contract, which the shared contract tests check.

use cfgsrv_core::{Document, SparsePatch};

use crate::error::StorageError;

/// Storage contract for one document kind.
///
/// The trait is synchronous; async callers run it on a blocking thread.
/// Implementations take `&self` and hold no request-scoped state, so a single
/// instance can be shared across threads behind an `Arc`.
pub trait Repository<D: Document>: Send + Sync {
    /// Inserts a new document.
    ///
    /// Fails with [`StorageError::DuplicateData`] if a document with the same
    /// id exists, [`StorageError::UnknownError`] on any other fault.
    fn add(&self, doc: &D) -> Result<(), StorageError>;

    /// Returns every document in storage-defined order.
    fn get_all(&self) -> Result<Vec<D>, StorageError>;

    /// Fetches one document.
    ///
    /// Fails with [`StorageError::CannotGetData`] when the id is unknown or
    /// the stored document cannot be decoded.
    fn get_by_id(&self, id: &str) -> Result<D, StorageError>;

    /// Merges `patch` into the document currently stored under `id`.
    ///
    /// Only listed fields change. An empty patch, or an id that matches
    /// nothing, is a successful no-op.
    fn update_by_id(&self, id: &str, patch: &SparsePatch) -> Result<(), StorageError>;

    /// Removes a document. Removing an unknown id succeeds.
    fn delete_by_id(&self, id: &str) -> Result<(), StorageError>;
}
