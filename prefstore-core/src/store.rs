//! Main record store interface for interacting with storage backends.
//!
//! [`RecordStore`] owns a backend and hands out collection views over it. It
//! is the injected dependency the access facade is built around; there are no
//! process-wide collection singletons.

use crate::{
    backend::{IndexSpec, StoreBackend},
    collection::{Collection, TypedCollection},
    error::StoreResult,
    record::Record,
};

/// A record store bound to a specific backend implementation.
///
/// # Example
///
/// ```ignore
/// let store = RecordStore::new(my_backend);
/// let vehicles = store.typed_collection::<Vehicles>();
/// ```
#[derive(Debug)]
pub struct RecordStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> RecordStore<B> {
    /// Creates a new record store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Gets a typed collection for the specified record type.
    ///
    /// The collection name is determined by the record type's
    /// `collection_name()` method.
    pub fn typed_collection<'a, R: Record>(&'a self) -> TypedCollection<'a, B, R> {
        TypedCollection::new(&self.backend)
    }

    /// Gets an untyped collection with the given name.
    pub fn collection<'a>(&'a self, name: &str) -> Collection<'a, B> {
        Collection::new(name.to_string(), &self.backend)
    }

    /// Creates a collection with the given name. Idempotent.
    pub async fn create_collection(&self, name: &str) -> StoreResult<()> {
        self.backend.create_collection(name).await
    }

    /// Declares a named secondary index over a collection. Idempotent.
    pub async fn ensure_index(
        &self,
        collection: &str,
        name: &str,
        spec: IndexSpec,
    ) -> StoreResult<()> {
        self.backend
            .ensure_index(collection, name, spec)
            .await
    }

    /// Lists all collections in the store.
    pub async fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.backend.list_collections().await
    }

    /// Shuts down the store and releases backend resources.
    ///
    /// This consumes the store and should be called when no longer needed.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }
}
