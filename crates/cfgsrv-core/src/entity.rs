//! Traits shared by every stored entity kind.
//!
//! [`Document`] is what storage needs: a collection name, a serde shape and
//! the natural id. [`Entity`] adds the construction and reconciliation hooks
//! the service layer drives.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::reconcile::Reconciled;

/// A record persisted as one document in a flat collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection (table) holding documents of this kind.
    const COLLECTION: &'static str;

    /// The derived natural id.
    fn id(&self) -> &str;
}

/// A document kind with a create constructor and partial-update support.
pub trait Entity: Document {
    /// All fields a caller supplies on create.
    type Options: Send + 'static;
    /// Any subset of the caller-editable fields.
    type Partial: Send + 'static;

    /// Builds a new entity, deriving its id.
    fn create(options: Self::Options) -> Self;

    /// Merges `partial` into `self` (the stored snapshot).
    fn reconcile(&self, partial: &Self::Partial) -> Reconciled<Self>;
}
