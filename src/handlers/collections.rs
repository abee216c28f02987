use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::controllayer::documents::{
    ListQuery, create_document, delete_document, get_document, list_documents, update_document,
};
use crate::datalayer::store::DocumentStore;
use crate::errors::ServiceResult;

/// State for one collection route group
#[derive(Clone)]
pub struct CollectionContext {
    pub collection: &'static str,
    pub store: Arc<dyn DocumentStore>,
}

/// CRUD routes for one collection, meant to be nested under `/api/<collection>`
pub fn collection_routes<S>(collection: &'static str, store: Arc<dyn DocumentStore>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(fetch).put(update).delete(remove))
        .with_state(CollectionContext { collection, store })
}

/// GET /api/<collection>
pub async fn list(
    State(ctx): State<CollectionContext>,
    Query(query): Query<ListQuery>,
) -> ServiceResult<Json<Vec<Value>>> {
    let documents = list_documents(ctx.store.as_ref(), ctx.collection, query).await?;
    Ok(Json(documents))
}

/// POST /api/<collection>
pub async fn create(
    State(ctx): State<CollectionContext>,
    Json(body): Json<Value>,
) -> ServiceResult<(StatusCode, Json<Value>)> {
    let created = create_document(ctx.store.as_ref(), ctx.collection, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/<collection>/:id
pub async fn fetch(
    State(ctx): State<CollectionContext>,
    Path(id): Path<String>,
) -> ServiceResult<Json<Value>> {
    let document = get_document(ctx.store.as_ref(), ctx.collection, &id).await?;
    Ok(Json(document))
}

/// PUT /api/<collection>/:id
pub async fn update(
    State(ctx): State<CollectionContext>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ServiceResult<Json<Value>> {
    let updated = update_document(ctx.store.as_ref(), ctx.collection, &id, body).await?;
    Ok(Json(updated))
}

/// DELETE /api/<collection>/:id
pub async fn remove(
    State(ctx): State<CollectionContext>,
    Path(id): Path<String>,
) -> ServiceResult<Json<Value>> {
    delete_document(ctx.store.as_ref(), ctx.collection, &id).await?;
    Ok(Json(json!({ "deleted": true, "_id": id })))
}
