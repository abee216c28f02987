use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::ServiceKind;
use crate::datalayer::db_ops::DatabaseHealth;
use crate::datalayer::store::DocumentStore;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

/// Readiness probe response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness report; never touches the database
pub fn health_report(service: ServiceKind) -> HealthResponse {
    HealthResponse {
        status: "OK".to_string(),
        message: service.health_message().to_string(),
        service: service.name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    }
}

/// Readiness report
///
/// Returns 200 OK when the database answers a ping,
/// 503 Service Unavailable otherwise.
pub async fn readiness_report(store: &dyn DocumentStore) -> (StatusCode, ReadinessResponse) {
    match store.ping().await {
        Ok(health) => (
            StatusCode::OK,
            ReadinessResponse {
                status: "ready".to_string(),
                database: Some(health),
                error: None,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ReadinessResponse {
                    status: "unavailable".to_string(),
                    database: None,
                    error: Some(e.to_string()),
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datalayer::store::MockDocumentStore;
    use crate::errors::ServiceError;

    #[test]
    fn test_health_report() {
        let report = health_report(ServiceKind::Library);
        assert_eq!(report.status, "OK");
        assert_eq!(report.message, "Library Backend is running");
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
        assert!(report.timestamp > 0);
    }

    #[tokio::test]
    async fn test_readiness_ready() {
        let mut store = MockDocumentStore::new();
        store.expect_ping().times(1).returning(|| {
            Ok(DatabaseHealth {
                is_healthy: true,
                latency_ms: 2,
                database: "lendify".to_string(),
            })
        });

        let (status, report) = readiness_report(&store).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.status, "ready");
        assert_eq!(report.database.unwrap().database, "lendify");
    }

    #[tokio::test]
    async fn test_readiness_unavailable() {
        let mut store = MockDocumentStore::new();
        store
            .expect_ping()
            .times(1)
            .returning(|| Err(ServiceError::DatabaseConnectionError));

        let (status, report) = readiness_report(&store).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.status, "unavailable");
        assert_eq!(report.error.as_deref(), Some("Failed to connect to database"));
    }
}
