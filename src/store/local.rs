//! Local fallback cache: one JSON file per collection.
//!
//! The boundary is a byte-oriented key-value store (`read`/`write` on a
//! collection key); (de)serialization of the entity list is layered on top.
//! Writes are serialized per collection through a process-wide async mutex,
//! which is all the locking this single-user system needs. The cache exists
//! for offline/demo continuity only — nothing here reconciles back to the
//! remote store.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use tokio::sync::Mutex;

use super::samples;
use crate::error::{Error, Result};
use crate::model::{Collection, Entity};

/// One write lock per collection key, shared by every store handle in the
/// process regardless of which directory it points at.
static COLLECTION_LOCKS: Lazy<HashMap<Collection, Mutex<()>>> = Lazy::new(|| {
    Collection::ALL
        .into_iter()
        .map(|collection| (collection, Mutex::new(())))
        .collect()
});

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl Default for LocalStore {
    fn default() -> Self {
        let root = std::env::var("FALLBACK_DATA_DIR")
            .unwrap_or_else(|_| "data/fallback".to_string());
        Self { root: root.into() }
    }
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The write lock for a collection. Callers hold it across their whole
    /// read-modify-write cycle.
    pub fn lock(collection: Collection) -> &'static Mutex<()> {
        COLLECTION_LOCKS
            .get(&collection)
            .expect("every collection has a lock")
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.key()))
    }

    /// Raw read at the byte-store boundary. `None` means the collection was
    /// never populated.
    pub fn read(&self, collection: Collection) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path(collection)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Raw write at the byte-store boundary.
    pub fn write(&self, collection: Collection, bytes: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path(collection), bytes)
    }

    /// Probe used by the health surface: can this process persist at all?
    pub fn probe(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(".probe");
        std::fs::write(&path, b"ok")?;
        std::fs::remove_file(path)
    }

    /// Loads a collection, seeding it once from the bundled samples when it
    /// was never populated. A cache that exists but no longer parses is a
    /// terminal storage failure, not something to silently re-seed over.
    pub fn load_or_seed<T: Entity>(&self) -> Result<Vec<T>> {
        match self.read(T::COLLECTION).map_err(|e| storage(T::COLLECTION, e))? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::Storage(format!(
                    "fallback cache for '{}' is corrupt: {e}",
                    T::COLLECTION
                ))
            }),
            None => {
                let seeded: Vec<T> = serde_json::from_value(samples::records(T::COLLECTION))
                    .map_err(|e| {
                        Error::Storage(format!(
                            "bundled samples for '{}' are malformed: {e}",
                            T::COLLECTION
                        ))
                    })?;
                tracing::info!(
                    collection = %T::COLLECTION,
                    count = seeded.len(),
                    "seeding fallback cache from bundled samples"
                );
                self.persist(&seeded)?;
                Ok(seeded)
            }
        }
    }

    pub fn persist<T: Entity>(&self, items: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(items)
            .map_err(|e| Error::Storage(format!("serialize '{}': {e}", T::COLLECTION)))?;
        self.write(T::COLLECTION, &bytes)
            .map_err(|e| storage(T::COLLECTION, e))
    }
}

fn storage(collection: Collection, err: io::Error) -> Error {
    Error::Storage(format!("fallback cache for '{collection}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Article;
    use tempfile::TempDir;

    #[test]
    fn test_read_unpopulated_collection_is_none() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        assert!(store.read(Collection::Articles).unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        store.write(Collection::Services, b"[]").unwrap();
        assert_eq!(store.read(Collection::Services).unwrap().unwrap(), b"[]");
    }

    #[test]
    fn test_load_or_seed_seeds_exactly_once() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());

        let seeded: Vec<Article> = store.load_or_seed().unwrap();
        assert!(!seeded.is_empty());

        // Mutate and persist; a second load must serve the persisted state,
        // not re-seed.
        let mut items = seeded.clone();
        items.pop();
        store.persist(&items).unwrap();

        let reloaded: Vec<Article> = store.load_or_seed().unwrap();
        assert_eq!(reloaded.len(), seeded.len() - 1);
    }

    #[test]
    fn test_corrupt_cache_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        store.write(Collection::Articles, b"not json").unwrap();

        let err = store.load_or_seed::<Article>().unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_probe_roundtrips() {
        let dir = TempDir::new().unwrap();
        assert!(LocalStore::new(dir.path()).probe().is_ok());
    }
}
