//! Normalization applied to every record before it is written remotely.
//!
//! The document store rejects records carrying an absent-value marker, so each
//! record is serialized with every field present: absent optionals become an
//! explicit `null`. Only JSON objects can be stored as array elements or
//! documents; anything else is rejected before a write is attempted.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Serialize `record` into its stored form.
///
/// # Errors
///
/// Returns [`StoreError::Encode`] if the record does not serialize to a JSON
/// object.
pub fn sanitize<T: Serialize + ?Sized>(record: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(record).map_err(|e| StoreError::Encode(e.to_string()))? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Encode(format!(
            "only objects can be stored, got {}",
            kind(&other)
        ))),
    }
}

/// [`sanitize`], returned as a [`Value`] ready for an array operation.
///
/// # Errors
///
/// Same as [`sanitize`].
pub fn sanitize_value<T: Serialize + ?Sized>(record: &T) -> Result<Value, StoreError> {
    sanitize(record).map(Value::Object)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
