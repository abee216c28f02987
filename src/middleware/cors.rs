use crate::{cors::AllowList, errors::errors::ServiceError, logging::create_counter};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use opentelemetry::metrics::Counter;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Methods advertised in preflight responses
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Shared, read-only state for [`origin_gate`]
#[derive(Clone)]
pub struct CorsState {
    allow_list: Arc<AllowList>,
    rejections: Counter<u64>,
}

impl CorsState {
    pub fn new(allow_list: Arc<AllowList>) -> Self {
        Self {
            allow_list,
            rejections: create_counter(
                "cors_origin_rejections_total",
                "Requests rejected because their Origin is not allow-listed",
            ),
        }
    }
}

fn origin_str(origin: &HeaderValue) -> String {
    String::from_utf8_lossy(origin.as_bytes()).into_owned()
}

/// Credentialed CORS headers for allow-listed origins
///
/// The request origin is echoed back rather than the configured entry.
/// `OPTIONS` requests are answered by the layer itself.
pub fn cors_layer(allow_list: Arc<AllowList>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            allow_list.is_allowed(Some(&origin_str(origin)))
        }))
        .allow_credentials(true)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request())
}

/// Rejects requests whose `Origin` is not allow-listed
///
/// Runs ahead of [`cors_layer`], so a rejected request (preflight included)
/// gets the `OriginRejected` error and no CORS headers.
pub async fn origin_gate(State(cors): State<CorsState>, request: Request, next: Next) -> Response {
    let origin = request.headers().get(header::ORIGIN).map(origin_str);

    if let Err(rejected) = cors.allow_list.check(origin.as_deref()) {
        tracing::warn!(
            origin = %rejected.origin,
            method = %request.method(),
            uri = %request.uri(),
            "Origin not allowed by CORS"
        );
        cors.rejections.add(1, &[]);
        return ServiceError::from(rejected).into_response();
    }

    if request.method() == Method::OPTIONS {
        tracing::debug!(origin = ?origin, "CORS preflight");
    }

    next.run(request).await
}
