//! Schema registry: collection and index declarations.
//!
//! Run [`install`] once at application start. It creates the five preference
//! collections and declares the two secondary indexes over the protocol
//! collection. Installation is idempotent.

use prefstore_core::{
    backend::{IndexSpec, StoreBackend},
    error::StoreResult,
    record::Record,
    store::RecordStore,
};

use crate::records::{
    FavoriteBusLines, FavoriteBuscaBus, FavoriteSepProtocol, Settings, Vehicles,
};

/// Index over `protocols.number`; populated by every current write.
pub const PROTOCOL_INDEX: &str = "favoriteProcess";

/// Index over the flat `favoriteProcess` field of the pre-protocols record
/// layout. No current write populates that field; the index only ever matches
/// historical data and is kept so those records stay reachable.
pub const PROTOCOL_INDEX_LEGACY: &str = "favoriteProcessOld";

/// Creates the preference collections and declares the protocol indexes.
pub async fn install<B: StoreBackend>(store: &RecordStore<B>) -> StoreResult<()> {
    for name in [
        FavoriteBusLines::collection_name(),
        FavoriteBuscaBus::collection_name(),
        Settings::collection_name(),
        Vehicles::collection_name(),
        FavoriteSepProtocol::collection_name(),
    ] {
        store.create_collection(name).await?;
    }

    store
        .ensure_index(
            FavoriteSepProtocol::collection_name(),
            PROTOCOL_INDEX,
            IndexSpec::multi("protocols.number"),
        )
        .await?;
    store
        .ensure_index(
            FavoriteSepProtocol::collection_name(),
            PROTOCOL_INDEX_LEGACY,
            IndexSpec::multi("favoriteProcess"),
        )
        .await?;

    Ok(())
}
