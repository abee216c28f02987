use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{collections::collection_routes, dashboard, frontend, health};
use crate::middleware::{
    CorsState, cors_layer, error_handling_middleware, origin_gate, panic_response,
    request_id_middleware, route_not_found,
};
use crate::state::AppState;
use std::sync::Arc;

/// Create the application router for the service in `state`.
///
/// Layer order, outermost first: request id, HTTP trace span, origin gate,
/// CORS headers, panic catcher, error logging. A rejected origin never
/// reaches a handler, and panics still get CORS headers.
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    // Health routes
    let health_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::readiness));

    let mut router = Router::new().merge(health_routes);

    // Collection routes - /api/<collection>
    for &collection in state.service.collections() {
        router = router.nest(
            &format!("/api/{collection}"),
            collection_routes(collection, state.store.clone()),
        );
    }

    if state.service.has_dashboard() {
        router = router.route("/api/dashboard", get(dashboard::dashboard_summary));
    }

    let router = if state.service.serves_frontend() {
        router.fallback_service(frontend::frontend_service(&config.frontend_build_dir))
    } else {
        router.fallback(route_not_found)
    };

    let allow_list = Arc::new(config.allow_list.clone());

    router
        .layer(from_fn(error_handling_middleware))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(allow_list.clone()))
        .layer(from_fn_with_state(CorsState::new(allow_list), origin_gate))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Paths mounted for `config.service`, for the startup log
pub fn endpoint_summary(config: &AppConfig) -> Vec<String> {
    let mut endpoints = vec![
        "/api/health - health check".to_string(),
        "/api/health/ready - database readiness".to_string(),
    ];
    endpoints.extend(
        config
            .service
            .collections()
            .iter()
            .map(|collection| format!("/api/{collection} - {collection} collection")),
    );
    if config.service.has_dashboard() {
        endpoints.push("/api/dashboard - collection summary".to_string());
    }
    if config.service.serves_frontend() {
        endpoints.push(format!(
            "/* - frontend from {}",
            config.frontend_build_dir.display()
        ));
    }
    endpoints
}
