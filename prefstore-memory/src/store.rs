//! In-memory storage implementation for the record store.
//!
//! This module provides a backend that stores records as BSON values in
//! HashMaps behind an async-aware read-write lock. It is primarily a test
//! double and development backend; index lookups scan the collection.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::Bson;
use mea::rwlock::RwLock;

use prefstore_core::{
    backend::{IndexSpec, StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    record::UserId,
};

use crate::index::{bson_eq, index_entries};

#[derive(Default, Debug)]
struct CollectionState {
    records: HashMap<UserId, Bson>,
    indexes: HashMap<String, IndexSpec>,
}

type StoreMap = HashMap<String, CollectionState>;

/// Thread-safe in-memory record storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so
/// multiple clones of the same instance share the same underlying data.
/// Secondary index lookups scan all records in the collection; this is
/// acceptable for the handful of user-preference collections it backs.
///
/// # Example
///
/// ```ignore
/// use prefstore_memory::InMemoryStore;
/// use prefstore_core::backend::StoreBackend;
/// use bson::{Bson, doc};
///
/// let store = InMemoryStore::new();
/// store.insert_record(7, Bson::Document(doc! { "id": 7_i64 }), "vehicles").await?;
/// let found = store.find_record(7, "vehicles").await?;
/// assert!(found.is_some());
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory record store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_record(
        &self,
        id: UserId,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()> {
        let mut store = self.store.write().await;
        let state = store
            .entry(collection.to_string())
            .or_default();

        if state.records.contains_key(&id) {
            return Err(StoreError::RecordAlreadyExists(id, collection.to_string()));
        }

        state.records.insert(id, record);

        Ok(())
    }

    async fn replace_record(
        &self,
        id: UserId,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()> {
        let mut store = self.store.write().await;
        let state = match store.get_mut(collection) {
            Some(state) => state,
            None => return Err(StoreError::CollectionNotFound(collection.to_string())),
        };

        if !state.records.contains_key(&id) {
            return Err(StoreError::RecordNotFound(id, collection.to_string()));
        }

        state.records.insert(id, record);

        Ok(())
    }

    async fn find_record(&self, id: UserId, collection: &str) -> StoreResult<Option<Bson>> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .and_then(|state| state.records.get(&id))
            .cloned())
    }

    async fn find_by_index(
        &self,
        index: &str,
        value: Bson,
        collection: &str,
    ) -> StoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let state = match store.get(collection) {
            Some(state) => state,
            None => return Ok(vec![]),
        };

        let spec = state
            .indexes
            .get(index)
            .ok_or_else(|| StoreError::IndexNotFound(index.to_string(), collection.to_string()))?;

        Ok(state
            .records
            .values()
            .filter(|record| {
                index_entries(record, spec)
                    .iter()
                    .any(|entry| bson_eq(entry, &value))
            })
            .cloned()
            .collect())
    }

    async fn create_collection(&self, name: &str) -> StoreResult<()> {
        self.store
            .write()
            .await
            .entry(name.to_string())
            .or_default();

        Ok(())
    }

    async fn ensure_index(
        &self,
        collection: &str,
        name: &str,
        spec: IndexSpec,
    ) -> StoreResult<()> {
        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .indexes
            .insert(name.to_string(), spec);

        Ok(())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .store
            .read()
            .await
            .keys()
            .cloned()
            .collect())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
