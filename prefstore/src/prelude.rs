//! Convenient re-exports of commonly used types from prefstore.
//!
//! ```ignore
//! use prefstore::prelude::*;
//! ```

pub use prefstore_core::{
    backend::{IndexSpec, StoreBackend, StoreBackendBuilder},
    collection::{Collection, TypedCollection},
    error::{StoreError, StoreResult},
    record::{Record, RecordExt, UserId},
    store::RecordStore,
};

pub use crate::{
    records::{
        FavoriteBusLines, FavoriteBuscaBus, FavoriteSepProtocol, ProtocolEntry, Settings,
        Vehicles,
    },
    service::DataService,
};
