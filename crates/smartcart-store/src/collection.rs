//! Generic document collection.
//!
//! An ordered, lock-guarded map of documents keyed by their ID. This is
//! the storefront's stand-in for a document database collection: every
//! public operation takes the lock once, so a single call is atomic with
//! respect to other callers.

use crate::error::StoreError;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// A document with a string identity.
pub trait Document: Clone {
    /// The document's unique key within its collection.
    fn key(&self) -> String;
}

/// An in-memory document collection.
pub struct Collection<T: Document> {
    inner: RwLock<BTreeMap<String, T>>,
}

impl<T: Document> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert a document, failing if the key is taken.
    pub fn insert(&self, doc: T) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let key = doc.key();
        if map.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        map.insert(key, doc);
        Ok(())
    }

    /// Insert or replace a document.
    pub fn upsert(&self, doc: T) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(doc.key(), doc);
        Ok(())
    }

    /// Get a document by key.
    pub fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    /// Get a document by key, failing if absent.
    pub fn get_required(&self, key: &str) -> Result<T, StoreError> {
        self.get(key)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Remove a document by key, returning it if present.
    pub fn remove(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.remove(key))
    }

    /// Check whether a key exists.
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.contains_key(key))
    }

    /// Number of documents.
    pub fn len(&self) -> Result<usize, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.len())
    }

    /// Check whether the collection is empty.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot all documents matching a predicate.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().filter(|d| pred(d)).cloned().collect())
    }

    /// Snapshot all documents.
    pub fn all(&self) -> Result<Vec<T>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }

    /// Mutate a document in place under the write lock.
    ///
    /// The closure runs while the lock is held; the update is atomic
    /// with respect to all other collection operations.
    pub fn update<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let doc = map
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        Ok(f(doc))
    }

    /// Run a fallible mutation over the whole map under one write lock.
    ///
    /// Used for multi-document invariants (e.g. all-or-nothing stock
    /// reservation). If the closure errors, partial mutations it made are
    /// the closure's responsibility to avoid.
    pub fn with_all_mut<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, T>) -> R,
    ) -> Result<R, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&mut map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: String,
        value: i64,
    }

    impl Document for Doc {
        fn key(&self) -> String {
            self.id.clone()
        }
    }

    fn doc(id: &str, value: i64) -> Doc {
        Doc {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let coll = Collection::new();
        coll.insert(doc("a", 1)).unwrap();

        assert_eq!(coll.get("a").unwrap().unwrap().value, 1);
        assert!(coll.get("b").unwrap().is_none());
        assert!(coll.get_required("b").is_err());
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let coll = Collection::new();
        coll.insert(doc("a", 1)).unwrap();
        assert!(matches!(
            coll.insert(doc("a", 2)),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_upsert_replaces() {
        let coll = Collection::new();
        coll.upsert(doc("a", 1)).unwrap();
        coll.upsert(doc("a", 2)).unwrap();
        assert_eq!(coll.get("a").unwrap().unwrap().value, 2);
        assert_eq!(coll.len().unwrap(), 1);
    }

    #[test]
    fn test_update_in_place() {
        let coll = Collection::new();
        coll.insert(doc("a", 1)).unwrap();

        let previous = coll.update("a", |d| std::mem::replace(&mut d.value, 10)).unwrap();
        assert_eq!(previous, 1);
        assert_eq!(coll.get("a").unwrap().unwrap().value, 10);

        assert!(coll.update("missing", |_| ()).is_err());
    }

    #[test]
    fn test_filter_and_remove() {
        let coll = Collection::new();
        coll.insert(doc("a", 1)).unwrap();
        coll.insert(doc("b", 2)).unwrap();
        coll.insert(doc("c", 3)).unwrap();

        let big = coll.filter(|d| d.value >= 2).unwrap();
        assert_eq!(big.len(), 2);

        assert!(coll.remove("b").unwrap().is_some());
        assert!(coll.remove("b").unwrap().is_none());
        assert_eq!(coll.len().unwrap(), 2);
    }
}
