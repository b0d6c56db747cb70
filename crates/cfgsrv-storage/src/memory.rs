//! In-memory implementation of [`Repository`].
//!
//! [`InMemoryStore`] is the backend for tests and ephemeral runs. It keeps
//! each collection as an insertion-ordered list of JSON documents and gives
//! them identical semantics to the SQLite backend: unique ids, sparse field
//! merges on update, idempotent deletes.
//!
//! It also counts write attempts and can be told to fail writes, so callers
//! can check that an operation did (or did not) reach storage.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dashmap::DashMap;
use serde_json::{Map, Value};

use cfgsrv_core::{Document, SparsePatch};

use crate::error::StorageError;
use crate::traits::Repository;

type Collection = Vec<Map<String, Value>>;

/// Document store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: DashMap<&'static str, Collection>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write operations (add, update, delete) attempted so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// When set, every write fails with [`StorageError::UnknownError`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn begin_write(&self) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::unknown("write rejected by store"));
        }
        Ok(())
    }
}

fn doc_id(doc: &Map<String, Value>) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

fn to_document<D: Document>(doc: &D) -> Result<Map<String, Value>, StorageError> {
    match serde_json::to_value(doc).map_err(StorageError::unknown)? {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::unknown(format!(
            "{} document is not an object: {}",
            D::COLLECTION,
            other
        ))),
    }
}

fn from_document<D: Document>(doc: &Map<String, Value>) -> Result<D, StorageError> {
    serde_json::from_value(Value::Object(doc.clone())).map_err(StorageError::unreadable)
}

impl<D: Document> Repository<D> for InMemoryStore {
    fn add(&self, doc: &D) -> Result<(), StorageError> {
        self.begin_write()?;
        let encoded = to_document(doc)?;
        let mut collection = self.collections.entry(D::COLLECTION).or_default();
        if collection.iter().any(|d| doc_id(d) == Some(doc.id())) {
            return Err(StorageError::DuplicateData {
                collection: D::COLLECTION,
                id: doc.id().to_string(),
            });
        }
        collection.push(encoded);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<D>, StorageError> {
        match self.collections.get(D::COLLECTION) {
            Some(collection) => collection.iter().map(from_document::<D>).collect(),
            None => Ok(Vec::new()),
        }
    }

    fn get_by_id(&self, id: &str) -> Result<D, StorageError> {
        let collection = self
            .collections
            .get(D::COLLECTION)
            .ok_or_else(|| StorageError::not_found(D::COLLECTION, id))?;
        let doc = collection
            .iter()
            .find(|d| doc_id(d) == Some(id))
            .ok_or_else(|| StorageError::not_found(D::COLLECTION, id))?;
        from_document(doc)
    }

    fn update_by_id(&self, id: &str, patch: &SparsePatch) -> Result<(), StorageError> {
        self.begin_write()?;
        if patch.is_empty() {
            return Ok(());
        }
        let Some(mut collection) = self.collections.get_mut(D::COLLECTION) else {
            return Ok(());
        };
        let Some(pos) = collection.iter().position(|d| doc_id(d) == Some(id)) else {
            return Ok(());
        };

        if let Some(new_id) = patch.get("id") {
            let taken = collection
                .iter()
                .enumerate()
                .any(|(i, d)| i != pos && doc_id(d) == Some(new_id));
            if taken {
                return Err(StorageError::DuplicateData {
                    collection: D::COLLECTION,
                    id: new_id.to_string(),
                });
            }
        }

        patch.apply_to(&mut collection[pos]);
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        self.begin_write()?;
        if let Some(mut collection) = self.collections.get_mut(D::COLLECTION) {
            collection.retain(|d| doc_id(d) != Some(id));
        }
        Ok(())
    }
}
