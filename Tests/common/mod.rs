#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use lender_backend::config::{AppConfig, ServiceKind};
use lender_backend::cors::AllowList;
use lender_backend::datalayer::DatabaseHealth;
use lender_backend::datalayer::store::{DocumentStore, JsonDocument};
use lender_backend::errors::{ServiceError, ServiceResult};
use lender_backend::routes::create_router;
use lender_backend::state::AppState;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-process stand-in for MongoDB
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, JsonDocument>>>,
    calls: AtomicUsize,
    pub offline: bool,
    pub panics: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Store whose every operation panics
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::default()
        }
    }

    /// Number of store operations performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) -> ServiceResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("in-memory store panicked");
        }
        if self.offline {
            Err(ServiceError::DatabaseConnectionError)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list(&self, collection: &str, limit: i64) -> ServiceResult<Vec<Value>> {
        self.touch()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .take(limit as usize)
                    .cloned()
                    .map(Value::Object)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> ServiceResult<Option<Value>> {
        self.touch()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
            .map(Value::Object))
    }

    async fn insert(&self, collection: &str, mut document: JsonDocument) -> ServiceResult<Value> {
        self.touch()?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        document.insert("_id".to_string(), Value::String(id.clone()));
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .insert(id, document.clone());
        Ok(Value::Object(document))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: JsonDocument,
    ) -> ServiceResult<Option<Value>> {
        self.touch()?;
        let mut collections = self.collections.lock().unwrap();
        let Some(existing) = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
        else {
            return Ok(None);
        };
        for (key, value) in fields {
            if key != "_id" {
                existing.insert(key, value);
            }
        }
        Ok(Some(Value::Object(existing.clone())))
    }

    async fn delete(&self, collection: &str, id: &str) -> ServiceResult<bool> {
        self.touch()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some())
    }

    async fn count(&self, collection: &str) -> ServiceResult<u64> {
        self.touch()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| docs.len() as u64)
            .unwrap_or(0))
    }

    async fn ping(&self) -> ServiceResult<DatabaseHealth> {
        self.touch()?;
        Ok(DatabaseHealth {
            is_healthy: true,
            latency_ms: 0,
            database: "memory".to_string(),
        })
    }
}

/// Router for `service` over `store`, restricted to `origins`
pub fn router_with(
    service: ServiceKind,
    store: Arc<InMemoryStore>,
    origins: &[&str],
) -> Router {
    let config = AppConfig::new(service)
        .with_allow_list(AllowList::from_entries(origins.iter().copied()));
    create_router(AppState::new(store, service), &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
