use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{FindOptions, ReturnDocument};
use mongodb::Collection;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::datalayer::db_ops::{DatabaseHealth, DbManager};
use crate::datalayer::store::document_store::{DocumentStore, JsonDocument};
use crate::errors::{ServiceError, ServiceResult};

/// [`DocumentStore`] backed by the MongoDB database selected in [`DbManager`]
#[derive(Clone, Debug)]
pub struct MongoStore {
    db: DbManager,
}

impl MongoStore {
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.database().collection::<Document>(name)
    }
}

fn parse_id(id: &str) -> ServiceResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ServiceError::InvalidDocumentId(id.to_string()))
}

/// Render a stored document as JSON, with `_id` flattened to its hex string
fn to_json(mut document: Document) -> Value {
    if let Ok(oid) = document.get_object_id("_id") {
        document.insert("_id", oid.to_hex());
    }
    Bson::Document(document).into_relaxed_extjson()
}

fn to_bson(fields: &JsonDocument) -> ServiceResult<Document> {
    let mut document = mongodb::bson::to_document(fields)?;
    document.remove("_id");
    Ok(document)
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[instrument(skip(self))]
    async fn list(&self, collection: &str, limit: i64) -> ServiceResult<Vec<Value>> {
        let options = FindOptions::builder().limit(limit).build();
        let mut cursor = self
            .collection(collection)
            .find(doc! {})
            .with_options(options)
            .await?;

        let mut documents = Vec::new();
        while cursor.advance().await? {
            let document: Document = cursor.deserialize_current()?;
            documents.push(to_json(document));
        }

        debug!(count = documents.len(), "Listed documents");
        Ok(documents)
    }

    #[instrument(skip(self))]
    async fn get(&self, collection: &str, id: &str) -> ServiceResult<Option<Value>> {
        let oid = parse_id(id)?;
        let found = self.collection(collection).find_one(doc! { "_id": oid }).await?;
        Ok(found.map(to_json))
    }

    #[instrument(skip(self, document))]
    async fn insert(&self, collection: &str, document: JsonDocument) -> ServiceResult<Value> {
        let mut document = to_bson(&document)?;
        let result = self.collection(collection).insert_one(&document).await?;
        document.insert("_id", result.inserted_id);

        debug!("Inserted document");
        Ok(to_json(document))
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: JsonDocument,
    ) -> ServiceResult<Option<Value>> {
        let oid = parse_id(id)?;
        let fields = to_bson(&fields)?;
        let coll = self.collection(collection);

        // An empty $set is rejected by the server
        let updated = if fields.is_empty() {
            coll.find_one(doc! { "_id": oid }).await?
        } else {
            coll.find_one_and_update(doc! { "_id": oid }, doc! { "$set": fields })
                .return_document(ReturnDocument::After)
                .await?
        };

        Ok(updated.map(to_json))
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> ServiceResult<bool> {
        let oid = parse_id(id)?;
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": oid })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self, collection: &str) -> ServiceResult<u64> {
        Ok(self.collection(collection).count_documents(doc! {}).await?)
    }

    async fn ping(&self) -> ServiceResult<DatabaseHealth> {
        Ok(self.db.health_check().await?)
    }
}
