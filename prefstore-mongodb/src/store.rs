//! MongoDB storage implementation for the record store.
//!
//! Records are stored with the numeric user id as `_id`. Named secondary
//! indexes are created as Mongo indexes over their field path; Mongo indexes
//! are multikey over arrays natively, so a multi-valued [`IndexSpec`] maps
//! directly to a path index. The name-to-path mapping is kept in process so
//! lookups by index name can be translated into field-path filters; it is
//! repopulated by schema installation at every process start.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mea::rwlock::RwLock;
use mongodb::{
    Client, Collection as MongoCollection, IndexModel,
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
};

use prefstore_core::{
    backend::{IndexSpec, StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    record::UserId,
};

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
    indexes: RwLock<HashMap<(String, String), IndexSpec>>,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self {
            client,
            database,
            indexes: RwLock::new(HashMap::new()),
        }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn prepare_record(&self, id: UserId, record: &Bson) -> StoreResult<Document> {
        Ok(Document::from_iter(
            record
                .as_document()
                .cloned()
                .ok_or_else(|| StoreError::InvalidRecord("Expected document".into()))?
                .into_iter()
                .chain(vec![("_id".to_string(), Bson::Int64(id))]),
        ))
    }

    fn restore_record(&self, document: &Document) -> Bson {
        Bson::Document(Document::from_iter(
            document
                .clone()
                .into_iter()
                .filter(|(k, _)| k != "_id"),
        ))
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_record(
        &self,
        id: UserId,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()> {
        self.get_collection(collection)
            .insert_one(self.prepare_record(id, &record)?)
            .await
            .map_err(|e| match *e.kind {
                ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == 11000 => {
                    StoreError::RecordAlreadyExists(id, collection.to_string())
                }
                _ => StoreError::Backend(e.to_string()),
            })?;

        Ok(())
    }

    async fn replace_record(
        &self,
        id: UserId,
        record: Bson,
        collection: &str,
    ) -> StoreResult<()> {
        let result = self
            .get_collection(collection)
            .replace_one(doc! { "_id": id }, self.prepare_record(id, &record)?)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(StoreError::RecordNotFound(id, collection.to_string()));
        }

        Ok(())
    }

    async fn find_record(&self, id: UserId, collection: &str) -> StoreResult<Option<Bson>> {
        Ok(self
            .get_collection(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(|document| self.restore_record(&document)))
    }

    async fn find_by_index(
        &self,
        index: &str,
        value: Bson,
        collection: &str,
    ) -> StoreResult<Vec<Bson>> {
        let field = {
            let indexes = self.indexes.read().await;

            indexes
                .get(&(collection.to_string(), index.to_string()))
                .map(|spec| spec.field.clone())
                .ok_or_else(|| {
                    StoreError::IndexNotFound(index.to_string(), collection.to_string())
                })?
        };

        Ok(self
            .get_collection(collection)
            .find(doc! { field: value })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .iter()
            .map(|document| self.restore_record(document))
            .collect())
    }

    async fn create_collection(&self, name: &str) -> StoreResult<()> {
        let database = self.client.database(&self.database);

        let existing = database
            .list_collection_names()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !existing.iter().any(|n| n == name) {
            database
                .create_collection(name)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        Ok(())
    }

    async fn ensure_index(
        &self,
        collection: &str,
        name: &str,
        spec: IndexSpec,
    ) -> StoreResult<()> {
        self.get_collection(collection)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { spec.field.clone(): 1 })
                    .options(
                        IndexOptions::builder()
                            .name(name.to_string())
                            .build(),
                    )
                    .build(),
            )
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        self.indexes
            .write()
            .await
            .insert((collection.to_string(), name.to_string()), spec);

        Ok(())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .client
            .database(&self.database)
            .list_collection_names()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?)
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MongoDbStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| StoreError::Initialization(e.to_string()))?,
            )
            .map_err(|e| StoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
