use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::datalayer::store::{DocumentStore, JsonDocument};
use crate::errors::{ServiceError, ServiceResult};

pub const DEFAULT_LIST_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

/// Request bodies must be JSON objects
pub fn require_object(body: Value) -> ServiceResult<JsonDocument> {
    match body {
        Value::Object(fields) => Ok(fields),
        other => Err(ServiceError::InvalidInput(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn not_found(collection: &str, id: &str) -> ServiceError {
    ServiceError::DocumentNotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

pub async fn list_documents(
    store: &dyn DocumentStore,
    collection: &str,
    query: ListQuery,
) -> ServiceResult<Vec<Value>> {
    query.validate()?;
    store
        .list(collection, query.limit.unwrap_or(DEFAULT_LIST_LIMIT))
        .await
}

pub async fn get_document(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> ServiceResult<Value> {
    store
        .get(collection, id)
        .await?
        .ok_or_else(|| not_found(collection, id))
}

pub async fn create_document(
    store: &dyn DocumentStore,
    collection: &str,
    body: Value,
) -> ServiceResult<Value> {
    let fields = require_object(body)?;
    let created = store.insert(collection, fields).await?;

    info!(collection = %collection, id = ?created.get("_id"), "Document created");
    Ok(created)
}

pub async fn update_document(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    body: Value,
) -> ServiceResult<Value> {
    let fields = require_object(body)?;
    store
        .update(collection, id, fields)
        .await?
        .ok_or_else(|| not_found(collection, id))
}

pub async fn delete_document(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> ServiceResult<()> {
    if store.delete(collection, id).await? {
        info!(collection = %collection, id = %id, "Document deleted");
        Ok(())
    } else {
        Err(not_found(collection, id))
    }
}
