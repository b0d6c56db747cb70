//! SQLite implementation of [`Repository`].
//!
//! [`SqliteStore`] persists each entity as a JSON document in the table
//! named after its collection, with the natural id mirrored into a `UNIQUE`
//! column. Migrations run once when the store is opened; each operation then
//! opens its own connection, so concurrent requests share no in-process
//! connection and take no lock.

use rusqlite::{ffi, params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use tracing::debug;

use cfgsrv_core::{Document, SparsePatch};

use crate::error::StorageError;
use crate::traits::Repository;

/// SQLite-backed document store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: String,
}

impl SqliteStore {
    /// Opens (or creates) a database at `path` and migrates it.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let _conn = crate::schema::open_database(path)?;
        debug!(path, "sqlite store ready");
        Ok(SqliteStore {
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn open_conn(&self) -> Result<Connection, StorageError> {
        crate::schema::connect(&self.path)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn decode<D: Document>(body: &str) -> Result<D, StorageError> {
    serde_json::from_str(body).map_err(StorageError::unreadable)
}

impl<D: Document> Repository<D> for SqliteStore {
    fn add(&self, doc: &D) -> Result<(), StorageError> {
        let body = serde_json::to_string(doc).map_err(StorageError::unknown)?;
        let conn = self.open_conn()?;
        let sql = format!("INSERT INTO {} (id, body) VALUES (?1, ?2)", D::COLLECTION);
        conn.execute(&sql, params![doc.id(), body]).map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::DuplicateData {
                    collection: D::COLLECTION,
                    id: doc.id().to_string(),
                }
            } else {
                StorageError::unknown(e)
            }
        })?;
        debug!(collection = D::COLLECTION, id = doc.id(), "document inserted");
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<D>, StorageError> {
        let conn = self.open_conn().map_err(StorageError::unreadable)?;
        let sql = format!("SELECT body FROM {} ORDER BY doc_key", D::COLLECTION);
        let mut stmt = conn.prepare(&sql).map_err(StorageError::unreadable)?;
        let bodies = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(StorageError::unreadable)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::unreadable)?;
        bodies.iter().map(|body| decode(body)).collect()
    }

    fn get_by_id(&self, id: &str) -> Result<D, StorageError> {
        let conn = self.open_conn().map_err(StorageError::unreadable)?;
        let sql = format!("SELECT body FROM {} WHERE id = ?1", D::COLLECTION);
        let body: Option<String> = conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()
            .map_err(StorageError::unreadable)?;
        match body {
            Some(body) => decode(&body),
            None => Err(StorageError::not_found(D::COLLECTION, id)),
        }
    }

    fn update_by_id(&self, id: &str, patch: &SparsePatch) -> Result<(), StorageError> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut conn = self.open_conn()?;
        let tx = conn.transaction().map_err(StorageError::unknown)?;

        let select = format!("SELECT doc_key, body FROM {} WHERE id = ?1", D::COLLECTION);
        let row: Option<(i64, String)> = tx
            .query_row(&select, params![id], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()
            .map_err(StorageError::unknown)?;
        let Some((doc_key, body)) = row else {
            debug!(collection = D::COLLECTION, id, "update matched no document");
            return Ok(());
        };

        let mut document: Map<String, Value> =
            serde_json::from_str(&body).map_err(StorageError::unknown)?;
        patch.apply_to(&mut document);
        // Re-encode through the entity so the body keeps its field order.
        let patched: D =
            serde_json::from_value(Value::Object(document)).map_err(StorageError::unknown)?;
        let new_id = patched.id().to_string();
        let new_body = serde_json::to_string(&patched).map_err(StorageError::unknown)?;

        let update = format!(
            "UPDATE {} SET id = ?1, body = ?2 WHERE doc_key = ?3",
            D::COLLECTION
        );
        tx.execute(&update, params![new_id, new_body, doc_key])
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StorageError::DuplicateData {
                        collection: D::COLLECTION,
                        id: new_id.clone(),
                    }
                } else {
                    StorageError::unknown(e)
                }
            })?;
        tx.commit().map_err(StorageError::unknown)?;

        debug!(
            collection = D::COLLECTION,
            id,
            new_id = %new_id,
            fields = ?patch.field_names(),
            "document patched"
        );
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        let conn = self.open_conn()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", D::COLLECTION);
        let removed = conn
            .execute(&sql, params![id])
            .map_err(StorageError::unknown)?;
        debug!(collection = D::COLLECTION, id, removed, "document deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgsrv_core::{Entity, Language, LanguageOptions, LanguagePartial};

    fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfgsrv.db");
        let store = SqliteStore::new(path.to_str().unwrap()).unwrap();
        (dir, store)
    }

    #[test]
    fn corrupt_body_is_cannot_get_data() {
        let (_dir, store) = temp_store();
        let conn = crate::schema::connect(store.path()).unwrap();
        conn.execute(
            "INSERT INTO languages (id, body) VALUES ('bad_1', 'not json')",
            [],
        )
        .unwrap();

        let err = Repository::<Language>::get_by_id(&store, "bad_1").unwrap_err();
        assert!(matches!(err, StorageError::CannotGetData { .. }));
        let err = Repository::<Language>::get_all(&store).unwrap_err();
        assert!(matches!(err, StorageError::CannotGetData { .. }));
    }

    #[test]
    fn rename_updates_indexed_id_column() {
        let (_dir, store) = temp_store();
        let lang = Language::new(LanguageOptions {
            name: "Python".into(),
            version: "3.10".into(),
            build_script: String::new(),
            run_script: "python3 main.py".into(),
        });
        store.add(&lang).unwrap();

        let mut patch = SparsePatch::new();
        patch.push_present("id", Some(&"python_3.11".to_string()));
        patch.push_present("version", Some(&"3.11".to_string()));
        Repository::<Language>::update_by_id(&store, "python_3.10", &patch).unwrap();

        let conn = crate::schema::connect(store.path()).unwrap();
        let ids: Vec<String> = conn
            .prepare("SELECT id FROM languages")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(ids, vec!["python_3.11"]);
    }

    fn stored_body(store: &SqliteStore, id: &str) -> String {
        let conn = crate::schema::connect(store.path()).unwrap();
        conn.query_row("SELECT body FROM languages WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn idempotent_update_leaves_body_unchanged() {
        let (_dir, store) = temp_store();
        let lang = Language::new(LanguageOptions {
            name: "Python".into(),
            version: "3.10".into(),
            build_script: String::new(),
            run_script: "py".into(),
        });
        store.add(&lang).unwrap();
        let before = stored_body(&store, "python_3.10");

        let out = lang.reconcile(&LanguagePartial {
            name: Some("Python".into()),
            version: Some("3.10".into()),
            build_script: Some(String::new()),
            run_script: Some("py".into()),
        });
        assert_eq!(out.patch.len(), 5);
        Repository::<Language>::update_by_id(&store, "python_3.10", &out.patch).unwrap();

        assert_eq!(stored_body(&store, "python_3.10"), before);
    }

    #[test]
    fn only_unique_constraint_counts_as_duplicate() {
        let (_dir, store) = temp_store();
        let conn = crate::schema::connect(store.path()).unwrap();
        conn.execute("INSERT INTO languages (id, body) VALUES ('go_1.22', '{}')", [])
            .unwrap();

        let dup = conn
            .execute("INSERT INTO languages (id, body) VALUES ('go_1.22', '{}')", [])
            .unwrap_err();
        assert!(is_unique_violation(&dup));

        let not_null = conn
            .execute("INSERT INTO languages (id, body) VALUES ('go_1.21', NULL)", [])
            .unwrap_err();
        assert!(!is_unique_violation(&not_null));
    }

    #[test]
    fn data_survives_reopen() {
        let (dir, store) = temp_store();
        let lang = Language::new(LanguageOptions {
            name: "C".into(),
            version: "17".into(),
            build_script: "gcc main.c".into(),
            run_script: "./a.out".into(),
        });
        store.add(&lang).unwrap();
        drop(store);

        let reopened = SqliteStore::new(dir.path().join("cfgsrv.db").to_str().unwrap()).unwrap();
        let got: Language = reopened.get_by_id("c_17").unwrap();
        assert_eq!(got, lang);
    }
}
