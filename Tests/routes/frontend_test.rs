#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::{InMemoryStore, body_json, get, send};
use lender_backend::config::{AppConfig, ServiceKind};
use lender_backend::cors::AllowList;
use lender_backend::routes::{create_router, endpoint_summary};
use lender_backend::state::AppState;
use std::sync::Arc;

const INDEX_HTML: &str = "<!doctype html><div id=\"root\"></div>";

fn frontend_router(build_dir: &std::path::Path) -> axum::Router {
    let config = AppConfig::new(ServiceKind::Library)
        .with_allow_list(AllowList::default())
        .with_frontend_build_dir(build_dir);
    let state = AppState::new(Arc::new(InMemoryStore::new()), ServiceKind::Library);
    create_router(state, &config)
}

fn build_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("static").join("app.js"), "console.log(1);").unwrap();
    dir
}

async fn body_text(response: axum::http::Response<axum::body::Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_serves_static_asset() {
    let dir = build_dir();

    let response = send(frontend_router(dir.path()), get("/static/app.js")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "console.log(1);");
}

#[tokio::test]
async fn test_root_serves_index() {
    let dir = build_dir();

    let response = send(frontend_router(dir.path()), get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, INDEX_HTML);
}

#[tokio::test]
async fn test_client_side_route_falls_back_to_index() {
    let dir = build_dir();

    let response = send(frontend_router(dir.path()), get("/students/42/edit")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, INDEX_HTML);
}

#[tokio::test]
async fn test_api_routes_take_precedence_over_frontend() {
    let dir = build_dir();

    let response = send(frontend_router(dir.path()), get("/api/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "OK");
}

#[test]
fn test_endpoint_summary_lists_service_routes() {
    let library = endpoint_summary(&AppConfig::new(ServiceKind::Library));
    assert!(library.iter().any(|e| e.starts_with("/api/students")));
    assert!(library.iter().any(|e| e.starts_with("/api/books")));
    assert!(library.iter().any(|e| e.starts_with("/* - frontend")));

    let dashboard = endpoint_summary(&AppConfig::new(ServiceKind::Dashboard));
    assert!(dashboard.iter().any(|e| e.starts_with("/api/dashboard")));
    assert!(dashboard.iter().any(|e| e.starts_with("/api/loans")));
    assert!(!dashboard.iter().any(|e| e.starts_with("/* - frontend")));
}
