//! Record types for the five user preference collections.
//!
//! Each collection gets an explicit value type instead of an untyped payload:
//! unknown fields are rejected at this boundary rather than silently
//! persisted. Wire field names (and the collection names themselves) are kept
//! identical to the layout historical data was written under, including the
//! `id` spelling of the user id.
//!
//! Every record carries a `date`; when absent on deserialization it defaults
//! to the current time. The access facade uses it for the last-write-wins
//! upsert policy.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use prefstore_core::record::{Record, UserId};

/// Favorite bus lines of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FavoriteBusLines {
    #[serde(rename = "id")]
    pub user_id: UserId,
    #[serde(default = "DateTime::now")]
    pub date: DateTime,
    #[serde(rename = "busLines", default)]
    pub bus_lines: Vec<String>,
}

impl Record for FavoriteBusLines {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn date(&self) -> DateTime {
        self.date
    }

    fn collection_name() -> &'static str {
        "favoriteBusLines"
    }
}

/// Saved "busca bus" searches of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FavoriteBuscaBus {
    #[serde(rename = "id")]
    pub user_id: UserId,
    #[serde(default = "DateTime::now")]
    pub date: DateTime,
    #[serde(default)]
    pub searches: Vec<String>,
}

impl Record for FavoriteBuscaBus {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn date(&self) -> DateTime {
        self.date
    }

    fn collection_name() -> &'static str {
        "favoriteBuscaBus"
    }
}

/// Per-user application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(rename = "id")]
    pub user_id: UserId,
    #[serde(default = "DateTime::now")]
    pub date: DateTime,
    #[serde(rename = "notificationsEnabled", default)]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub language: Option<String>,
}

impl Record for Settings {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn date(&self) -> DateTime {
        self.date
    }

    fn collection_name() -> &'static str {
        "settings"
    }
}

/// Vehicles registered by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vehicles {
    #[serde(rename = "id")]
    pub user_id: UserId,
    #[serde(default = "DateTime::now")]
    pub date: DateTime,
    #[serde(default)]
    pub plates: Vec<String>,
}

impl Record for Vehicles {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn date(&self) -> DateTime {
        self.date
    }

    fn collection_name() -> &'static str {
        "vehicles"
    }
}

/// An item in a user's favorite protocol list, identified by its protocol
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolEntry {
    pub number: String,
    pub subject: String,
    pub summary: String,
    pub status: String,
}

/// Favorite SEP protocol subscriptions of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FavoriteSepProtocol {
    #[serde(rename = "id")]
    pub user_id: UserId,
    #[serde(default = "DateTime::now")]
    pub date: DateTime,
    #[serde(default)]
    pub protocols: Vec<ProtocolEntry>,
}

impl Record for FavoriteSepProtocol {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn date(&self) -> DateTime {
        self.date
    }

    fn collection_name() -> &'static str {
        "favoriteSepProtocol"
    }
}
