//! MongoDB record storage backend for prefstore.
//!
//! Persistent implementation of the `StoreBackend` trait on top of the
//! official MongoDB driver. The numeric user id is stored as `_id`, and
//! declared secondary indexes become named Mongo indexes over their field
//! paths (multikey over arrays).

#[allow(unused_extern_crates)]
extern crate self as prefstore_mongodb;

pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
