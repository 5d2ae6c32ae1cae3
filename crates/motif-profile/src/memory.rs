//! In-process document store.
//!
//! Same array semantics as the hosted store (exact-value union/remove). Used
//! offline and in tests, where it can be told to fail writes or delay reads.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::document::{DocumentStore, Fields, apply_updates};
use crate::error::StoreError;
use crate::updates::FieldUpdate;

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, Fields>>,
    fail_writes: Mutex<Option<String>>,
    read_delay: Mutex<Option<Duration>>,
    token: Mutex<Option<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn path(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document.
    pub fn insert(&self, collection: &str, id: &str, fields: Fields) {
        lock(&self.docs).insert(path(collection, id), fields);
    }

    /// Current contents of a document.
    #[must_use]
    pub fn document(&self, collection: &str, id: &str) -> Option<Fields> {
        lock(&self.docs).get(&path(collection, id)).cloned()
    }

    /// Make every create and update fail with `reason` until cleared with
    /// `None`.
    pub fn fail_writes(&self, reason: Option<&str>) {
        *lock(&self.fail_writes) = reason.map(str::to_string);
    }

    /// Delay every `get` by `delay`.
    pub fn delay_reads(&self, delay: Option<Duration>) {
        *lock(&self.read_delay) = delay;
    }

    /// Last credential passed to [`DocumentStore::authorize`].
    #[must_use]
    pub fn authorized_token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        match lock(&self.fail_writes).as_ref() {
            Some(reason) => Err(StoreError::Api {
                status: 503,
                message: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        let delay = *lock(&self.read_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.document(collection, id))
    }

    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.check_writable()?;
        let path = path(collection, id);
        let mut docs = lock(&self.docs);
        if docs.contains_key(&path) {
            return Err(StoreError::AlreadyExists { path });
        }
        docs.insert(path, fields);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        updates: &[FieldUpdate],
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let path = path(collection, id);
        let mut docs = lock(&self.docs);
        let fields = docs
            .get_mut(&path)
            .ok_or_else(|| StoreError::NotFound { path: path.clone() })?;
        apply_updates(fields, updates);
        Ok(())
    }

    fn authorize(&self, id_token: Option<&str>) {
        *lock(&self.token) = id_token.map(str::to_string);
    }
}
