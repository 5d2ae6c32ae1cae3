//! The per-user profile document.

use chrono::{DateTime, SecondsFormat, Utc};
use motif_core::entities::SavedItem;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Fields;
use crate::error::StoreError;
use crate::sanitize::sanitize_value;

/// Field names in the profile document.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const HEARTS: &str = "hearts";
    pub const WATCHLIST: &str = "watchlist";
    pub const TAGS_CONTRIBUTED_COUNT: &str = "tags_contributed_count";
    pub const TAGS_HISTORY: &str = "tags_history";
}

/// One profile document per user, keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "saved_entries")]
    pub watchlist: Vec<SavedItem>,
    #[serde(default, deserialize_with = "saved_entries")]
    pub hearts: Vec<SavedItem>,
    #[serde(default)]
    pub tags_contributed_count: i64,
    #[serde(default)]
    pub tags_history: Vec<TagRecord>,
}

impl UserDocument {
    /// A fresh document with empty collections and a zero counter.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            email,
            ..Self::default()
        }
    }

    /// Decode a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if a field has the wrong type.
    pub fn from_fields(fields: Fields) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(fields)).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// An entry of `tags_history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(rename = "movieId")]
    pub movie_id: Option<i64>,
    pub tag: String,
    /// RFC 3339, millisecond precision.
    pub timestamp: String,
}

impl TagRecord {
    #[must_use]
    pub fn new(movie_id: i64, tag: &str, at: DateTime<Utc>) -> Self {
        let tag = tag.trim();
        Self {
            movie_id: (movie_id != 0).then_some(movie_id),
            tag: if tag.is_empty() { "unknown".into() } else { tag.to_string() },
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Stored collection entries are canonical records; older documents hold bare
/// ids, which migrate to records with placeholder title and year.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedEntry {
    Item(SavedItem),
    Id(i64),
    Other(Value),
}

fn saved_entries<'de, D>(deserializer: D) -> Result<Vec<SavedItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = Option::<Vec<SavedEntry>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            SavedEntry::Item(item) if item.id > 0 => Some(item),
            SavedEntry::Id(id) => SavedItem::new(id, "", "", None).ok(),
            SavedEntry::Item(_) | SavedEntry::Other(_) => {
                tracing::warn!("skipping unrecognized saved entry");
                None
            }
        })
        .collect())
}

/// Rewrite a stored collection with every recognized entry in the canonical
/// record shape.
///
/// Returns `None` when nothing changes. Unrecognized entries are kept as they
/// are.
#[must_use]
pub fn migrate_collection(stored: &Value) -> Option<Value> {
    let entries = stored.as_array()?;
    let migrated: Vec<Value> = entries
        .iter()
        .map(|entry| canonical_entry(entry).unwrap_or_else(|| entry.clone()))
        .collect();
    (migrated != *entries).then_some(Value::Array(migrated))
}

fn canonical_entry(entry: &Value) -> Option<Value> {
    let item = match SavedEntry::deserialize(entry).ok()? {
        SavedEntry::Item(item) if item.id > 0 => item,
        SavedEntry::Id(id) => SavedItem::new(id, "", "", None).ok()?,
        SavedEntry::Item(_) | SavedEntry::Other(_) => return None,
    };
    sanitize_value(&item).ok()
}
