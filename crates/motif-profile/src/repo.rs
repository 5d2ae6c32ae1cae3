//! Profile repository.
//!
//! Reads and writes the per-user profile document through a
//! [`DocumentStore`]. Every record written goes through [`sanitize`] first.

use std::sync::Arc;

use chrono::Utc;
use motif_core::entities::SavedItem;
use motif_core::enums::SavedList;

use crate::document::{DocumentStore, Fields};
use crate::error::StoreError;
use crate::profile::{TagRecord, UserDocument, fields, migrate_collection};
use crate::sanitize::{sanitize, sanitize_value};
use crate::updates::DocumentUpdateBuilder;

/// Default collection holding profile documents.
pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct ProfileRepo {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl std::fmt::Debug for ProfileRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileRepo")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl ProfileRepo {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, USERS_COLLECTION)
    }

    #[must_use]
    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Credential used for subsequent store requests.
    pub fn authorize(&self, id_token: Option<&str>) {
        self.store.authorize(id_token);
    }

    /// Fetch the user's profile, creating an empty one if none exists.
    ///
    /// Saved collections holding bare ids or records missing a field are
    /// rewritten in the canonical record shape, so later removals match the
    /// stored elements exactly.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read, the create, or the rewrite fails.
    pub async fn load_or_create(
        &self,
        uid: &str,
        name: &str,
        email: Option<&str>,
    ) -> Result<UserDocument, StoreError> {
        if let Some(existing) = self.store.get(&self.collection, uid).await? {
            tracing::debug!(%uid, "profile found");
            return self.decode_existing(uid, existing).await;
        }

        let document = UserDocument::new(name, email.map(str::to_string));
        match self
            .store
            .create(&self.collection, uid, sanitize(&document)?)
            .await
        {
            Ok(()) => {
                tracing::info!(%uid, "profile created");
                Ok(document)
            }
            // Created concurrently by another client.
            Err(StoreError::AlreadyExists { .. }) => {
                let fields = self
                    .store
                    .get(&self.collection, uid)
                    .await?
                    .ok_or_else(|| StoreError::NotFound {
                        path: format!("{}/{uid}", self.collection),
                    })?;
                self.decode_existing(uid, fields).await
            }
            Err(e) => Err(e),
        }
    }

    async fn decode_existing(&self, uid: &str, stored: Fields) -> Result<UserDocument, StoreError> {
        let mut builder = DocumentUpdateBuilder::new();
        let mut migrated = Vec::new();
        for field in [fields::HEARTS, fields::WATCHLIST] {
            if let Some(values) = stored.get(field).and_then(migrate_collection) {
                builder = builder.set(field, values);
                migrated.push(field);
            }
        }
        let document = UserDocument::from_fields(stored)?;
        if !migrated.is_empty() {
            self.store
                .update(&self.collection, uid, &builder.build())
                .await?;
            tracing::info!(%uid, ?migrated, "rewrote legacy saved entries");
        }
        Ok(document)
    }

    /// Add `item` to, or remove it from, the user's `list`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record cannot be encoded or the write fails.
    pub async fn toggle_interaction(
        &self,
        uid: &str,
        list: SavedList,
        item: &SavedItem,
        adding: bool,
    ) -> Result<(), StoreError> {
        let record = sanitize_value(item)?;
        let updates = if adding {
            DocumentUpdateBuilder::new().array_union(list.as_str(), record)
        } else {
            DocumentUpdateBuilder::new().array_remove(list.as_str(), record)
        }
        .build();
        self.store.update(&self.collection, uid, &updates).await?;
        tracing::info!(%uid, %list, id = item.id, adding, "updated saved list");
        Ok(())
    }

    /// Count a tag contribution and append it to the user's history.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub async fn submit_tag(&self, uid: &str, movie_id: i64, tag: &str) -> Result<TagRecord, StoreError> {
        let record = TagRecord::new(movie_id, tag, Utc::now());
        let updates = DocumentUpdateBuilder::new()
            .increment(fields::TAGS_CONTRIBUTED_COUNT, 1)
            .array_union(fields::TAGS_HISTORY, sanitize_value(&record)?)
            .build();
        self.store.update(&self.collection, uid, &updates).await?;
        tracing::info!(%uid, movie_id, tag = %record.tag, "tag submitted");
        Ok(record)
    }
}
