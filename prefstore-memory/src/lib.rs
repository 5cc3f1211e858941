//! In-memory record storage backend for prefstore.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `StoreBackend` trait, including scan-based secondary index lookups over
//! dotted field paths. It is ideal for tests, development, and as a test
//! double injected into the access facade.

#[allow(unused_extern_crates)]
extern crate self as prefstore_memory;

mod index;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
