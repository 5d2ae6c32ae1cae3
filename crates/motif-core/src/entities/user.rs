use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::DecoratedResult;
use crate::enums::SavedList;
use crate::errors::CoreError;

/// Canonical minimal record stored in a saved collection.
///
/// Stored records are removed remotely by exact value match, so every write
/// uses this one shape with every field present (`poster` is an explicit
/// `null` when absent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct SavedItem {
    pub id: i64,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
}

impl SavedItem {
    /// Build a saved record from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `id` is not a positive identifier.
    /// Synthesized placeholder identifiers are negative and never persisted.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        year: impl Into<String>,
        poster: Option<String>,
    ) -> Result<Self, CoreError> {
        if id <= 0 {
            return Err(CoreError::Validation(format!(
                "saved items need a positive id, got {id}"
            )));
        }
        let title = title.into();
        let year = year.into();
        Ok(Self {
            id,
            title: if title.trim().is_empty() { "Unknown Title".into() } else { title },
            year: if year.trim().is_empty() { "N/A".into() } else { year },
            poster,
        })
    }
}

impl TryFrom<&DecoratedResult> for SavedItem {
    type Error = CoreError;

    fn try_from(result: &DecoratedResult) -> Result<Self, Self::Error> {
        if result.unverified {
            return Err(CoreError::Unverified {
                title: result.title.clone(),
            });
        }
        Self::new(
            result.id,
            result.title.clone(),
            result.year.clone(),
            result.poster.clone(),
        )
    }
}

/// The signed-in user as the client sees it.
///
/// `hearts` and `watchlist` behave as sets keyed by item id; order is not
/// meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub hearts: Vec<SavedItem>,
    pub watchlist: Vec<SavedItem>,
}

impl SessionUser {
    /// A freshly signed-in user with empty collections.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: Option<String>,
        avatar: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email,
            avatar,
            hearts: Vec::new(),
            watchlist: Vec::new(),
        }
    }

    #[must_use]
    pub fn collection(&self, list: SavedList) -> &[SavedItem] {
        match list {
            SavedList::Hearts => &self.hearts,
            SavedList::Watchlist => &self.watchlist,
        }
    }

    fn collection_mut(&mut self, list: SavedList) -> &mut Vec<SavedItem> {
        match list {
            SavedList::Hearts => &mut self.hearts,
            SavedList::Watchlist => &mut self.watchlist,
        }
    }

    #[must_use]
    pub fn contains(&self, list: SavedList, id: i64) -> bool {
        self.collection(list).iter().any(|item| item.id == id)
    }

    /// Add `item` unless an item with the same id is already present.
    ///
    /// Returns whether the collection changed.
    pub fn insert(&mut self, list: SavedList, item: SavedItem) -> bool {
        if self.contains(list, item.id) {
            return false;
        }
        self.collection_mut(list).push(item);
        true
    }

    /// Remove every item with `id`. Returns the removed item, if any.
    pub fn remove(&mut self, list: SavedList, id: i64) -> Option<SavedItem> {
        let items = self.collection_mut(list);
        let position = items.iter().position(|item| item.id == id)?;
        let removed = items.remove(position);
        items.retain(|item| item.id != id);
        Some(removed)
    }

    /// Replace a collection, dropping duplicate ids (first occurrence wins).
    pub fn replace_collection(&mut self, list: SavedList, items: Vec<SavedItem>) {
        let target = self.collection_mut(list);
        target.clear();
        for item in items {
            if !target.iter().any(|existing| existing.id == item.id) {
                target.push(item);
            }
        }
    }
}
