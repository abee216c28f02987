#[path = "../common/mod.rs"]
mod common;

use axum::{body::Body, http::{Request, StatusCode}};
use common::{InMemoryStore, body_json, get, json_request, router_with, send};
use lender_backend::config::ServiceKind;
use serde_json::json;
use std::sync::Arc;

fn library(store: &Arc<InMemoryStore>) -> axum::Router {
    router_with(ServiceKind::Library, store.clone(), &[])
}

fn dashboard(store: &Arc<InMemoryStore>) -> axum::Router {
    router_with(ServiceKind::Dashboard, store.clone(), &[])
}

#[tokio::test]
async fn test_create_then_fetch_student() {
    let store = Arc::new(InMemoryStore::new());

    let response = send(
        library(&store),
        json_request("POST", "/api/students", json!({ "name": "Ada", "grade": 7 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Ada");

    let response = send(library(&store), get(&format!("/api/students/{id}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_books_respects_limit() {
    let store = Arc::new(InMemoryStore::new());
    for title in ["Dune", "Emma", "Ulysses"] {
        send(
            library(&store),
            json_request("POST", "/api/books", json!({ "title": title })),
        )
        .await;
    }

    let response = send(library(&store), get("/api/books")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);

    let response = send(library(&store), get("/api/books?limit=2")).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_rejects_invalid_limit() {
    let store = Arc::new(InMemoryStore::new());

    let response = send(library(&store), get("/api/books?limit=5000")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_merges_fields_and_keeps_id() {
    let store = Arc::new(InMemoryStore::new());
    let created = body_json(
        send(
            dashboard(&store),
            json_request("POST", "/api/loans", json!({ "book": "Dune", "returned": false })),
        )
        .await,
    )
    .await;
    let id = created["_id"].as_str().unwrap().to_string();

    let response = send(
        dashboard(&store),
        json_request(
            "PUT",
            &format!("/api/loans/{id}"),
            json!({ "_id": "forged", "returned": true }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["_id"], id.as_str());
    assert_eq!(updated["book"], "Dune");
    assert_eq!(updated["returned"], true);
}

#[tokio::test]
async fn test_delete_then_fetch_is_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let created = body_json(
        send(
            dashboard(&store),
            json_request("POST", "/api/loans", json!({ "book": "Emma" })),
        )
        .await,
    )
    .await;
    let id = created["_id"].as_str().unwrap().to_string();

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/loans/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = send(dashboard(&store), delete).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deleted"], true);

    let response = send(dashboard(&store), get(&format!("/api/loans/{id}"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "DOCUMENT_NOT_FOUND");
    assert_eq!(body["error"]["details"]["collection"], "loans");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let store = Arc::new(InMemoryStore::new());

    let response = send(
        library(&store),
        json_request("POST", "/api/students", json!(["Ada", "Grace"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_INPUT");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_dashboard_summary_counts_collections() {
    let store = Arc::new(InMemoryStore::new());
    send(
        library(&store),
        json_request("POST", "/api/students", json!({ "name": "Ada" })),
    )
    .await;
    send(
        dashboard(&store),
        json_request("POST", "/api/loans", json!({ "book": "Dune" })),
    )
    .await;
    send(
        dashboard(&store),
        json_request("POST", "/api/loans", json!({ "book": "Emma" })),
    )
    .await;

    let response = send(dashboard(&store), get("/api/dashboard")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["collections"]["students"], 1);
    assert_eq!(summary["collections"]["books"], 0);
    assert_eq!(summary["collections"]["loans"], 2);
    assert_eq!(summary["total"], 3);
}

#[tokio::test]
async fn test_database_outage_maps_to_503() {
    let store = Arc::new(InMemoryStore::offline());

    let response = send(dashboard(&store), get("/api/loans")).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await["error"]["code"],
        "DATABASE_CONNECTION_ERROR"
    );
}

#[tokio::test]
async fn test_services_only_mount_their_own_groups() {
    let store = Arc::new(InMemoryStore::new());

    let response = send(dashboard(&store), get("/api/students")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "ROUTE_NOT_FOUND");

    let response = send(dashboard(&store), get("/api/books")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
