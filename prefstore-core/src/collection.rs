//! Collection handles for record store operations.
//!
//! This module provides the per-collection view over a storage backend. It
//! offers a typed collection (records serialized and deserialized through
//! their [`Record`] implementation) and an untyped collection that works with
//! raw BSON documents. The untyped form exists for reads that must tolerate
//! historical document shapes a typed deserialize would reject.

use bson::Bson;
use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    record::{Record, RecordExt, UserId},
};

/// An untyped collection with a reference to a storage backend.
///
/// Documents are represented as raw BSON values; no shape validation is
/// applied on read.
#[derive(Debug)]
pub struct Collection<'a, B: StoreBackend> {
    name: String,
    backend: &'a B,
}

impl<'a, B: StoreBackend> Collection<'a, B> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up the raw document stored under the given user id.
    pub async fn find(&self, id: UserId) -> StoreResult<Option<Bson>> {
        self.backend.find_record(id, &self.name).await
    }

    /// Returns all raw documents whose indexed value equals `value`, via the
    /// named secondary index.
    pub async fn find_by_index(
        &self,
        index: &str,
        value: impl Into<Bson>,
    ) -> StoreResult<Vec<Bson>> {
        self.backend
            .find_by_index(index, value.into(), &self.name)
            .await
    }

    /// Inserts a raw document under the given user id.
    pub async fn insert(&self, id: UserId, document: Bson) -> StoreResult<()> {
        self.backend
            .insert_record(id, document, &self.name)
            .await
    }
}

/// A type-safe collection for a specific record type.
///
/// The collection name is taken from [`Record::collection_name`]; all
/// documents pass through the record type's serde implementation, so unknown
/// fields are rejected at this boundary.
#[derive(Debug)]
pub struct TypedCollection<'a, B: StoreBackend, R: Record> {
    name: String,
    backend: &'a B,
    _marker: PhantomData<R>,
}

impl<'a, B: StoreBackend, R: Record> TypedCollection<'a, B, R> {
    pub(crate) fn new(backend: &'a B) -> Self {
        Self {
            name: R::collection_name().to_string(),
            backend,
            _marker: PhantomData,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a new record keyed by its user id.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails or a record already exists under that id.
    pub async fn insert(&self, record: &R) -> StoreResult<()> {
        self.backend
            .insert_record(record.user_id(), record.to_bson()?, &self.name)
            .await
    }

    /// Replaces the stored record keyed by this record's user id in place.
    ///
    /// A full overwrite, not a field merge.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails or no record exists under that id.
    pub async fn replace(&self, record: &R) -> StoreResult<()> {
        self.backend
            .replace_record(record.user_id(), record.to_bson()?, &self.name)
            .await
    }

    /// Looks up a record by user id, returning `None` when absent.
    ///
    /// This is the branch point for the upsert policy; absence is an outcome
    /// here, not an error.
    pub async fn find(&self, id: UserId) -> StoreResult<Option<R>> {
        match self
            .backend
            .find_record(id, &self.name)
            .await?
        {
            Some(doc) => Ok(Some(R::from_bson(doc)?)),
            None => Ok(None),
        }
    }

    /// Looks up a record by user id, failing with
    /// [`StoreError::RecordNotFound`] when absent.
    pub async fn get(&self, id: UserId) -> StoreResult<R> {
        self.find(id)
            .await?
            .ok_or_else(|| StoreError::RecordNotFound(id, self.name.clone()))
    }

    /// Returns all records whose indexed value equals `value`, via the named
    /// secondary index.
    pub async fn find_by_index(
        &self,
        index: &str,
        value: impl Into<Bson>,
    ) -> StoreResult<Vec<R>> {
        self.backend
            .find_by_index(index, value.into(), &self.name)
            .await?
            .into_iter()
            .map(R::from_bson)
            .collect()
    }
}
