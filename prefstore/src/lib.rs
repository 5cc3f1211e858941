//! User preference data layer over pluggable document stores.
//!
//! This crate is the primary entry point of the prefstore project. It defines
//! the five user preference collections (favorite bus lines, saved bus
//! searches, settings, vehicles, favorite SEP protocols), the schema registry
//! that declares them, and the [`service::DataService`] access facade that
//! exposes per-collection save/get operations plus the protocol reverse
//! lookup.
//!
//! Saves follow a last-write-wins policy: a record replaces the stored one
//! only when its `date` is strictly later; otherwise the call is a no-op that
//! returns the stored record. Storage is delegated to a
//! [`backend::StoreBackend`] implementation.
//!
//! # Quick start
//!
//! ```ignore
//! use prefstore::{prelude::*, memory::InMemoryStore};
//! use bson::DateTime;
//!
//! #[tokio::main]
//! async fn main() -> StoreResult<()> {
//!     let service = DataService::open(InMemoryStore::new()).await?;
//!
//!     service
//!         .save_favorite_bus_lines(FavoriteBusLines {
//!             user_id: 7,
//!             date: DateTime::now(),
//!             bus_lines: vec!["8000-10".to_string()],
//!         })
//!         .await?;
//!
//!     let lines = service.get_favorite_bus_lines(7).await?;
//!     println!("{:?}", lines.bus_lines);
//!
//!     service.shutdown().await
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - in-memory storage for development and testing
//! - [`mongodb`] - persistent MongoDB backend (requires the `mongodb` feature)

pub mod prelude;
pub mod records;
pub mod schema;
pub mod service;

pub use prefstore_core::{backend, collection, error, record, store};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use prefstore_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use prefstore_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
