//! Entity model for the cfgsrv configuration registry.
//!
//! Languages and compare tasks are stored as flat documents keyed by a
//! natural id derived from their mutable fields. This crate owns the id
//! derivation rules, the partial-update value objects, the sparse patch
//! sent to storage, and the reconciler that merges a partial update into a
//! stored record.
//!
//! Everything here is pure: no I/O, no errors.

pub mod compare;
pub mod entity;
pub mod id;
pub mod language;
pub mod patch;
pub mod reconcile;

// Re-export commonly used types
pub use compare::{Compare, CompareOptions, ComparePartial, CompareUpdate};
pub use entity::{Document, Entity};
pub use id::{derive_compare_id, derive_language_id};
pub use language::{Language, LanguageOptions, LanguagePartial, LanguageUpdate};
pub use patch::{PatchField, SparsePatch};
pub use reconcile::Reconciled;
