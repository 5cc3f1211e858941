//! Storage backend abstraction for the record store.
//!
//! This module defines the trait that abstracts over concrete document-database
//! drivers. The data layer itself performs no indexing or persistence; it
//! delegates all of that to a [`StoreBackend`] implementation.
//!
//! # Traits
//!
//! - [`StoreBackend`]: the core trait for storage backends
//! - [`StoreBackendBuilder`]: factory trait for creating backend instances

use async_trait::async_trait;
use bson::Bson;
use std::fmt::Debug;

use crate::{error::StoreResult, record::UserId};

/// Declaration of a secondary index over a collection.
///
/// `field` is a dotted path into the stored record (e.g. `protocols.number`).
/// When `multi` is set, an array encountered along the path fans out to one
/// index entry per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// Dotted field path the index is built over.
    pub field: String,
    /// Whether each record may contribute multiple index entries.
    pub multi: bool,
}

impl IndexSpec {
    /// Creates a multi-valued index spec over the given field path.
    pub fn multi(field: impl Into<String>) -> Self {
        Self { field: field.into(), multi: true }
    }
}

/// Abstract interface for record storage backends.
///
/// Implementations must be thread-safe (`Send + Sync`) and support concurrent
/// access from multiple async tasks. The read-compare-write upsert performed
/// by the facade is not atomic at this layer; backends are not required to
/// serialize facade calls against each other.
///
/// All operations return [`StoreResult<T>`]; failures other than the explicit
/// not-found signalling of [`find_record`](StoreBackend::find_record) are
/// propagated to the caller unchanged.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a new record under the given user id.
    ///
    /// The collection is created automatically if it does not exist. Fails
    /// with [`StoreError::RecordAlreadyExists`](crate::error::StoreError) if a
    /// record is already stored under that id.
    async fn insert_record(
        &self,
        id: UserId,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()>;

    /// Replaces the record stored under the given user id in place.
    ///
    /// This is a full overwrite, not a field merge. Fails with
    /// [`StoreError::RecordNotFound`](crate::error::StoreError) if no record
    /// exists under that id.
    async fn replace_record(
        &self,
        id: UserId,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()>;

    /// Looks up the record stored under the given user id.
    ///
    /// Absence is signalled as `Ok(None)`, distinctly from other failures, so
    /// callers can branch on it without treating it as an error.
    async fn find_record(&self, id: UserId, collection: &str) -> StoreResult<Option<Bson>>;

    /// Returns all records whose indexed value equals `value`, via the named
    /// secondary index.
    ///
    /// The index must have been declared with
    /// [`ensure_index`](StoreBackend::ensure_index) beforehand.
    async fn find_by_index(
        &self,
        index: &str,
        value: Bson,
        collection: &str,
    ) -> StoreResult<Vec<Bson>>;

    /// Creates a collection with the given name. Idempotent.
    async fn create_collection(&self, name: &str) -> StoreResult<()>;

    /// Declares a named secondary index over a collection. Idempotent.
    async fn ensure_index(
        &self,
        collection: &str,
        name: &str,
        spec: IndexSpec,
    ) -> StoreResult<()>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends with external
    /// connections should override this.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
