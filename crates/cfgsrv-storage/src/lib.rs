//! Storage abstraction for cfgsrv entities.
//!
//! Provides the [`Repository`] trait defining the storage contract that all
//! backends implement, plus [`InMemoryStore`] and [`SqliteStore`] as the two
//! backends.
//!
//! Both backends treat an entity as a flat JSON document in a collection
//! named by [`Document::COLLECTION`](cfgsrv_core::Document::COLLECTION), and
//! apply updates as sparse field merges.
//!
//! # Modules
//!
//! - [`error`]: StorageError, the three-kind failure taxonomy
//! - [`traits`]: Repository trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL migrations and connection setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::Repository;
