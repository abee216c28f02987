use async_trait::async_trait;
use serde_json::Value;

use crate::datalayer::db_ops::DatabaseHealth;
use crate::errors::ServiceResult;

/// A schemaless JSON object as received from or returned to clients
pub type JsonDocument = serde_json::Map<String, Value>;

/// Collection access used by the route groups.
///
/// Documents carry their identifier under `_id` as a string. The store owns
/// identifier assignment; any `_id` in an incoming document is ignored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, collection: &str, limit: i64) -> ServiceResult<Vec<Value>>;

    async fn get(&self, collection: &str, id: &str) -> ServiceResult<Option<Value>>;

    async fn insert(&self, collection: &str, document: JsonDocument) -> ServiceResult<Value>;

    /// Merge `fields` into an existing document and return the result.
    /// `None` when no document has that id.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: JsonDocument,
    ) -> ServiceResult<Option<Value>>;

    /// `false` when no document has that id
    async fn delete(&self, collection: &str, id: &str) -> ServiceResult<bool>;

    async fn count(&self, collection: &str) -> ServiceResult<u64>;

    async fn ping(&self) -> ServiceResult<DatabaseHealth>;
}
