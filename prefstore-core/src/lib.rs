//! Core abstractions for the prefstore user preference data layer.
//!
//! This crate provides:
//!
//! - **Record traits** ([`record`]) - traits for defining and serializing user-keyed records
//! - **Store backend abstraction** ([`backend`]) - trait for pluggable document-database drivers
//! - **Collections interface** ([`collection`]) - typed and untyped per-collection views
//! - **Record store** ([`store`]) - owning wrapper that hands out collection views
//! - **Error handling** ([`error`]) - error taxonomy and result alias
//!
//! The hard parts of storage (indexing, querying, persistence) are delegated
//! entirely to [`backend::StoreBackend`] implementations; this crate only
//! defines the seams.

#[allow(unused_extern_crates)]
extern crate self as prefstore_core;

pub mod backend;
pub mod collection;
pub mod error;
pub mod record;
pub mod store;
