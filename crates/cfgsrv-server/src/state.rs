//! Application state: the process-wide context handed to every handler.
//!
//! [`AppState`] is built once at startup and owns the store handle shared by
//! both entity services. It is cheap to clone (everything sits behind
//! `Arc`) and holds no request-scoped or mutable state. Dropping the last
//! clone releases the store.

use std::sync::Arc;

use cfgsrv_core::{Compare, Language};
use cfgsrv_storage::{InMemoryStore, Repository, SqliteStore};

use crate::error::ApiError;
use crate::service::{CompareService, LanguageService};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub languages: LanguageService,
    pub compares: CompareService,
}

impl AppState {
    /// Builds services over any backend that stores both collections.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: Repository<Language> + Repository<Compare> + 'static,
    {
        AppState {
            languages: LanguageService::new(store.clone()),
            compares: CompareService::new(store),
        }
    }

    /// Opens (and migrates) the SQLite database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let store = SqliteStore::new(db_path)
            .map_err(|e| ApiError::InternalError(format!("failed to open store: {}", e)))?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// State over a fresh [`InMemoryStore`] (for testing).
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }
}
