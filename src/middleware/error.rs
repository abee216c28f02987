use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::errors::errors::ServiceError;

/// Logs every failed response with its request id.
///
/// Error bodies are produced by `ServiceError::into_response`; this layer
/// only observes them.
pub async fn error_handling_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<uuid::Uuid>()
        .map(|id| id.to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    if response.status().is_server_error() {
        tracing::error!(
            status = %response.status(),
            request_id = ?request_id,
            method = %method,
            uri = %uri,
            "Request failed"
        );
    } else if response.status().is_client_error() {
        tracing::warn!(
            status = %response.status(),
            request_id = ?request_id,
            method = %method,
            uri = %uri,
            "Request rejected"
        );
    }

    response
}

/// Turns a handler panic into a JSON 500 instead of a dropped connection.
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    ServiceError::InternalServerError(detail).into_response()
}

/// Fallback for unknown paths on services without a frontend
pub async fn route_not_found(request: Request) -> ServiceError {
    ServiceError::RouteNotFound(request.uri().path().to_string())
}
