//! The access facade: per-collection save/get operations plus the protocol
//! reverse lookup.
//!
//! All five save operations share one generic upsert with a last-write-wins
//! policy: an incoming record replaces the stored one only when its date is
//! strictly later; otherwise the call is a no-op and returns the stored
//! record. The read-compare-write sequence is not atomic; concurrent saves
//! for the same user can race, and the later-dated write wins at comparison
//! time (equal dates have no dedicated tie-break).

use bson::Bson;
use tracing::debug;

use prefstore_core::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    record::{Record, UserId},
    store::RecordStore,
};

use crate::{
    records::{FavoriteBusLines, FavoriteBuscaBus, FavoriteSepProtocol, Settings, Vehicles},
    schema,
};

/// The data-access facade over the five user preference collections.
///
/// Built around an injected [`StoreBackend`]; there is no hidden global
/// state, and tests inject the in-memory backend as a double.
#[derive(Debug)]
pub struct DataService<B: StoreBackend> {
    store: RecordStore<B>,
}

impl<B: StoreBackend> DataService<B> {
    /// Wraps an already-prepared backend without touching the schema.
    pub fn new(backend: B) -> Self {
        Self { store: RecordStore::new(backend) }
    }

    /// Wraps a backend and installs the schema (collections and indexes).
    pub async fn open(backend: B) -> StoreResult<Self> {
        let service = Self::new(backend);
        schema::install(&service.store).await?;

        Ok(service)
    }

    /// Returns the underlying record store.
    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    /// Shuts down the service and releases backend resources.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.store.shutdown().await
    }

    /// Generic last-write-wins upsert shared by all save operations.
    ///
    /// At most one existing-record read and at most one write per call.
    async fn save<R: Record>(&self, record: R) -> StoreResult<R> {
        let collection = self.store.typed_collection::<R>();
        let user_id = record.user_id();

        match collection.find(user_id).await? {
            Some(existing) => {
                if record.date() > existing.date() {
                    collection.replace(&record).await?;
                    debug!(collection = collection.name(), user_id, "record replaced");

                    Ok(record)
                } else {
                    debug!(collection = collection.name(), user_id, "stale write dropped");

                    Ok(existing)
                }
            }
            None => {
                collection.insert(&record).await?;
                debug!(collection = collection.name(), user_id, "record created");

                Ok(record)
            }
        }
    }

    async fn get<R: Record>(&self, user_id: UserId) -> StoreResult<R> {
        self.store
            .typed_collection::<R>()
            .get(user_id)
            .await
    }

    pub async fn save_favorite_bus_lines(
        &self,
        record: FavoriteBusLines,
    ) -> StoreResult<FavoriteBusLines> {
        self.save(record).await
    }

    pub async fn get_favorite_bus_lines(&self, user_id: UserId) -> StoreResult<FavoriteBusLines> {
        self.get(user_id).await
    }

    pub async fn save_favorite_busca_bus(
        &self,
        record: FavoriteBuscaBus,
    ) -> StoreResult<FavoriteBuscaBus> {
        self.save(record).await
    }

    pub async fn get_favorite_busca_bus(&self, user_id: UserId) -> StoreResult<FavoriteBuscaBus> {
        self.get(user_id).await
    }

    pub async fn save_settings(&self, record: Settings) -> StoreResult<Settings> {
        self.save(record).await
    }

    pub async fn get_settings(&self, user_id: UserId) -> StoreResult<Settings> {
        self.get(user_id).await
    }

    pub async fn save_vehicles(&self, record: Vehicles) -> StoreResult<Vehicles> {
        self.save(record).await
    }

    pub async fn get_vehicles(&self, user_id: UserId) -> StoreResult<Vehicles> {
        self.get(user_id).await
    }

    pub async fn save_favorite_sep_protocol(
        &self,
        record: FavoriteSepProtocol,
    ) -> StoreResult<FavoriteSepProtocol> {
        self.save(record).await
    }

    pub async fn get_favorite_sep_protocol(
        &self,
        user_id: UserId,
    ) -> StoreResult<FavoriteSepProtocol> {
        self.get(user_id).await
    }

    /// Returns the ids of all users subscribed to the given protocol number.
    ///
    /// Runs two independent lookups, one per index (legacy first, then
    /// current), and concatenates the results without de-duplication: a user
    /// whose record matches under both indexes appears twice. The lookups are
    /// raw so that legacy-shaped documents a typed read would reject still
    /// contribute their ids.
    pub async fn users_by_favorite_sep_protocol(
        &self,
        number: &str,
    ) -> StoreResult<Vec<UserId>> {
        let collection = self
            .store
            .collection(FavoriteSepProtocol::collection_name());

        let legacy = collection
            .find_by_index(schema::PROTOCOL_INDEX_LEGACY, number)
            .await?;
        let current = collection
            .find_by_index(schema::PROTOCOL_INDEX, number)
            .await?;

        legacy
            .iter()
            .chain(current.iter())
            .map(project_user_id)
            .collect()
    }
}

fn project_user_id(document: &Bson) -> StoreResult<UserId> {
    document
        .as_document()
        .and_then(|doc| doc.get("id"))
        .and_then(|id| match id {
            Bson::Int64(v) => Some(*v),
            Bson::Int32(v) => Some(i64::from(*v)),
            _ => None,
        })
        .ok_or_else(|| StoreError::InvalidRecord("indexed record has no numeric id".into()))
}
