//! Firestore REST v1 document store.
//!
//! Documents travel as typed values (`{"stringValue": ...}`,
//! `{"integerValue": "1"}`, ...). Field-level updates go through
//! `documents:commit` so that array union/remove and increment run as server
//! transforms with an `exists` precondition.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use motif_config::FirebaseConfig;
use serde_json::{Map, Value, json};

use crate::document::{DocumentStore, Fields};
use crate::error::StoreError;
use crate::updates::{FieldOp, FieldUpdate};

#[derive(Debug)]
pub struct FirestoreStore {
    http: reqwest::Client,
    documents_url: String,
    documents_root: String,
    api_key: String,
    id_token: RwLock<Option<String>>,
}

impl FirestoreStore {
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the HTTP client fails to build.
    pub fn new(config: &FirebaseConfig, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("motif/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            documents_url: config.documents_url(),
            documents_root: config.documents_root(),
            api_key: config.api_key.clone(),
            id_token: RwLock::new(None),
        })
    }

    fn url(&self, suffix: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{suffix}", self.documents_url);
        let params = params
            .iter()
            .copied()
            .chain((!self.api_key.is_empty()).then_some(("key", self.api_key.as_str())));
        for (index, (key, value)) in params.enumerate() {
            url.push(if index == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self
            .id_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        let url = self.url(&format!("/{collection}/{id}"), &[]);
        tracing::debug!(%collection, %id, "firestore get");
        let resp = self.authorized(self.http.get(&url)).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_status(resp, &format!("{collection}/{id}")).await?;
        let body: Value = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        decode_document(&body).map(Some)
    }

    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let url = self.url(&format!("/{collection}"), &[("documentId", id)]);
        tracing::debug!(%collection, %id, "firestore create");
        let body = json!({ "fields": encode_fields(&fields) });
        let resp = self.authorized(self.http.post(&url)).json(&body).send().await?;
        check_status(resp, &format!("{collection}/{id}")).await?;
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        updates: &[FieldUpdate],
    ) -> Result<(), StoreError> {
        let name = format!("{}/{collection}/{id}", self.documents_root);
        let url = self.url(":commit", &[]);
        tracing::debug!(%collection, %id, ops = updates.len(), "firestore commit");
        let body = commit_body(&name, updates);
        let resp = self.authorized(self.http.post(&url)).json(&body).send().await?;
        check_status(resp, &format!("{collection}/{id}")).await?;
        Ok(())
    }

    fn authorize(&self, id_token: Option<&str>) {
        *self.id_token.write().unwrap_or_else(PoisonError::into_inner) = id_token.map(str::to_string);
    }
}

async fn check_status(resp: reqwest::Response, path: &str) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match status {
        reqwest::StatusCode::NOT_FOUND => Err(StoreError::NotFound { path: path.into() }),
        reqwest::StatusCode::CONFLICT => Err(StoreError::AlreadyExists { path: path.into() }),
        _ => {
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let message = body["error"]["message"]
                .as_str()
                .map(str::to_string)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unknown status".into());
            Err(StoreError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Body of a `documents:commit` request applying `updates` to `name`.
#[must_use]
pub fn commit_body(name: &str, updates: &[FieldUpdate]) -> Value {
    let mut set_fields = Map::new();
    let mut transforms = Vec::new();
    for update in updates {
        let field_path = quote_field_path(&update.field);
        match &update.op {
            FieldOp::Set(value) => {
                set_fields.insert(update.field.clone(), encode_value(value));
            }
            FieldOp::Increment(by) => transforms.push(json!({
                "fieldPath": field_path,
                "increment": { "integerValue": by.to_string() },
            })),
            FieldOp::ArrayUnion(values) => transforms.push(json!({
                "fieldPath": field_path,
                "appendMissingElements": { "values": values.iter().map(encode_value).collect::<Vec<_>>() },
            })),
            FieldOp::ArrayRemove(values) => transforms.push(json!({
                "fieldPath": field_path,
                "removeAllFromArray": { "values": values.iter().map(encode_value).collect::<Vec<_>>() },
            })),
        }
    }

    let precondition = json!({ "exists": true });
    let write = if set_fields.is_empty() {
        json!({
            "transform": { "document": name, "fieldTransforms": transforms },
            "currentDocument": precondition,
        })
    } else {
        let mask: Vec<String> = set_fields.keys().map(|k| quote_field_path(k)).collect();
        json!({
            "update": { "name": name, "fields": set_fields },
            "updateMask": { "fieldPaths": mask },
            "updateTransforms": transforms,
            "currentDocument": precondition,
        })
    };
    json!({ "writes": [write] })
}

/// Backtick-quote a field name unless it is a simple identifier.
fn quote_field_path(field: &str) -> String {
    let simple = field
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        field.to_string()
    } else {
        format!("`{}`", field.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

/// Encode a JSON value as a Firestore typed value.
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

fn encode_fields(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), encode_value(v)))
            .collect(),
    )
}

/// Decode a Firestore typed value.
///
/// Timestamps and references decode to strings; geo points to
/// `{latitude, longitude}`.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] for values that are not typed values.
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(StoreError::Decode(format!("not a typed value: {value}")));
    };
    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" | "referenceValue"
        | "bytesValue" | "geoPointValue" => Ok(inner.clone()),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| StoreError::Decode(format!("integerValue {s:?}: {e}"))),
            Value::Number(_) => Ok(inner.clone()),
            _ => Err(StoreError::Decode(format!("integerValue {inner}"))),
        },
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map_or_else(|| Ok(Vec::new()), |items| items.iter().map(decode_value).collect())
            .map(Value::Array),
        "mapValue" => decode_fields(inner.get("fields")).map(Value::Object),
        other => Err(StoreError::Decode(format!("unsupported value type {other}"))),
    }
}

fn decode_fields(fields: Option<&Value>) -> Result<Fields, StoreError> {
    let Some(fields) = fields else {
        return Ok(Fields::new());
    };
    let fields = fields
        .as_object()
        .ok_or_else(|| StoreError::Decode("fields is not an object".into()))?;
    fields
        .iter()
        .map(|(k, v)| Ok((k.clone(), decode_value(v)?)))
        .collect()
}

/// Decode the `fields` of a document resource.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] if any field is malformed.
pub fn decode_document(document: &Value) -> Result<Fields, StoreError> {
    decode_fields(document.get("fields"))
}
