//! Error types and result types for record store operations.
//!
//! This module provides error handling for all record store operations.
//! Use [`StoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use thiserror::Error;

use crate::record::UserId;

/// Represents all possible errors that can occur when interacting with a record store.
///
/// This enum covers serialization errors, record lifecycle issues, collection and
/// index management, and backend-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serialization/deserialization error when converting a record to or from BSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A record with the given user id already exists in the collection.
    #[error("Record {0} already exists in collection {1}")]
    RecordAlreadyExists(UserId, String),
    /// The requested record was not found in the collection.
    #[error("Record {0} not found in collection {1}")]
    RecordNotFound(UserId, String),
    /// The requested collection does not exist in the store.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    /// A secondary index lookup named an index that was never declared.
    #[error("Index {0} not declared on collection {1}")]
    IndexNotFound(String, String),
    /// The record violates its declared shape or has invalid structure.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
