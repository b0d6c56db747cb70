//! Entity services: the coordinators between HTTP handlers and storage.
//!
//! One [`EntityService`] per entity kind. Add/get/delete delegate straight to
//! the repository; `update_by_id` is the only operation that sequences
//! fetch, reconcile, persist. Services own nothing but a shared repository
//! handle and take no locks.
//!
//! The update is not transactional: a concurrent writer between the fetch
//! and the persist is silently overwritten (last writer wins).

use std::sync::Arc;

use tracing::{debug, info};

use cfgsrv_core::{Compare, Entity, Language};
use cfgsrv_storage::Repository;

use crate::error::ServiceError;

pub type LanguageService = EntityService<Language>;
pub type CompareService = EntityService<Compare>;

/// CRUD plus partial update for one entity kind.
pub struct EntityService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        EntityService {
            repo: Arc::clone(&self.repo),
        }
    }
}

fn require_id(id: &str) -> Result<(), ServiceError> {
    if id.is_empty() {
        return Err(ServiceError::InvalidInput("id is required".to_string()));
    }
    Ok(())
}

impl<E: Entity> EntityService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        EntityService { repo }
    }

    /// Builds the entity (deriving its id) and inserts it.
    pub fn add(&self, options: E::Options) -> Result<E, ServiceError> {
        let entity = E::create(options);
        self.repo.add(&entity)?;
        info!(collection = E::COLLECTION, id = entity.id(), "added");
        Ok(entity)
    }

    pub fn get_all(&self) -> Result<Vec<E>, ServiceError> {
        Ok(self.repo.get_all()?)
    }

    pub fn get_by_id(&self, id: &str) -> Result<E, ServiceError> {
        require_id(id)?;
        Ok(self.repo.get_by_id(id)?)
    }

    /// Applies a partial update and returns the record as now stored.
    ///
    /// A failed fetch aborts before any write. The patch is matched against
    /// the original id even when the update renames the entity.
    pub fn update_by_id(&self, id: &str, partial: &E::Partial) -> Result<E, ServiceError> {
        require_id(id)?;
        let stored = self.repo.get_by_id(id)?;
        let reconciled = stored.reconcile(partial);
        debug!(
            collection = E::COLLECTION,
            id,
            fields = ?reconciled.patch.field_names(),
            "reconciled update"
        );

        self.repo.update_by_id(id, &reconciled.patch)?;
        info!(
            collection = E::COLLECTION,
            id,
            new_id = reconciled.updated.id(),
            "updated"
        );
        Ok(reconciled.updated)
    }

    pub fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        require_id(id)?;
        self.repo.delete_by_id(id)?;
        info!(collection = E::COLLECTION, id, "deleted");
        Ok(())
    }
}
