//! The remote document store seam.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::updates::{FieldOp, FieldUpdate};

/// Top-level fields of a document.
pub type Fields = Map<String, Value>;

/// A store of JSON documents addressed by collection and id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. A missing document is `Ok(None)`.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError>;

    /// Create a document, failing with [`StoreError::AlreadyExists`] if it
    /// exists.
    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Apply `updates` atomically to an existing document, failing with
    /// [`StoreError::NotFound`] if it does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        updates: &[FieldUpdate],
    ) -> Result<(), StoreError>;

    /// Credential for subsequent requests. Stores without access control
    /// ignore it.
    fn authorize(&self, _id_token: Option<&str>) {}
}

/// Apply `updates` to `fields` in place with the store's array semantics.
pub fn apply_updates(fields: &mut Fields, updates: &[FieldUpdate]) {
    for update in updates {
        match &update.op {
            FieldOp::Set(value) => {
                fields.insert(update.field.clone(), value.clone());
            }
            FieldOp::Increment(by) => {
                let current = fields.get(&update.field).and_then(Value::as_i64);
                let next = current.map_or(*by, |n| n.saturating_add(*by));
                fields.insert(update.field.clone(), Value::from(next));
            }
            FieldOp::ArrayUnion(values) => update_array(fields, &update.field, |array| {
                for value in values {
                    if !array.contains(value) {
                        array.push(value.clone());
                    }
                }
            }),
            FieldOp::ArrayRemove(values) => update_array(fields, &update.field, |array| {
                array.retain(|element| !values.contains(element));
            }),
        }
    }
}

/// Run `f` on the array stored at `field`. A missing or non-array value is
/// treated as an empty array.
fn update_array(fields: &mut Fields, field: &str, f: impl FnOnce(&mut Vec<Value>)) {
    let mut array = match fields.remove(field) {
        Some(Value::Array(array)) => array,
        _ => Vec::new(),
    };
    f(&mut array);
    fields.insert(field.to_string(), Value::Array(array));
}
