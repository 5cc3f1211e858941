//! Core traits and types for user-keyed record representation.
//!
//! Every stored record belongs to exactly one user and one collection, and
//! carries a write date used by the last-write-wins upsert policy.

use bson::{Bson, DateTime, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Primary key type for all collections: the numeric user id.
pub type UserId = i64;

/// Core trait that all records stored in a record store must implement.
///
/// A record is keyed by its owner's [`UserId`] and carries a write [`DateTime`].
/// The collection name determines where the record lives; it should match the
/// name historical data was written under.
///
/// # Example
///
/// ```ignore
/// use prefstore_core::record::{Record, UserId};
/// use bson::DateTime;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Vehicles {
///     #[serde(rename = "id")]
///     pub user_id: UserId,
///     pub date: DateTime,
///     pub plates: Vec<String>,
/// }
///
/// impl Record for Vehicles {
///     fn user_id(&self) -> UserId { self.user_id }
///     fn date(&self) -> DateTime { self.date }
///     fn collection_name() -> &'static str { "vehicles" }
/// }
/// ```
pub trait Record: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the user id that keys this record.
    fn user_id(&self) -> UserId;

    /// Returns the write date of this record.
    fn date(&self) -> DateTime;

    /// Returns the name of the collection this record belongs to.
    fn collection_name() -> &'static str;
}

/// Extension trait providing BSON conversion for records.
///
/// Automatically implemented for all types that implement [`Record`].
pub trait RecordExt: Record {
    /// Converts this record to a BSON value for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_bson(&self) -> StoreResult<Bson>;

    /// Creates a record from a stored BSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_bson(bson: Bson) -> StoreResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_bson(&self) -> StoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> StoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }
}
