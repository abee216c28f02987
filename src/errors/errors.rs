use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cors::OriginRejected;

/// Main error type for the lending backends
#[derive(Debug)]
pub enum ServiceError {
    // CORS
    OriginRejected(String),

    // Routing & Documents
    RouteNotFound(String),
    DocumentNotFound { collection: String, id: String },
    InvalidDocumentId(String),

    // Validation Errors
    ValidationError(String),
    InvalidInput(String),

    // Database Errors
    DatabaseError(String),
    DatabaseConnectionError,

    // Internal Errors
    InternalServerError(String),
    ConfigurationError(String),
}

/// Error response structure sent to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::OriginRejected(_) => write!(f, "Not allowed by CORS"),

            ServiceError::RouteNotFound(path) => write!(f, "Route not found: {}", path),
            ServiceError::DocumentNotFound { collection, id } => {
                write!(f, "Document not found in {}: {}", collection, id)
            }
            ServiceError::InvalidDocumentId(id) => write!(f, "Invalid document ID: {}", id),

            ServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),

            ServiceError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ServiceError::DatabaseConnectionError => write!(f, "Failed to connect to database"),

            ServiceError::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
            ServiceError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 403 Forbidden
            ServiceError::OriginRejected(_) => StatusCode::FORBIDDEN,

            // 404 Not Found
            ServiceError::RouteNotFound(_) | ServiceError::DocumentNotFound { .. } => {
                StatusCode::NOT_FOUND
            }

            // 400 Bad Request
            ServiceError::InvalidDocumentId(_)
            | ServiceError::ValidationError(_)
            | ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 503 Service Unavailable
            ServiceError::DatabaseConnectionError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            ServiceError::DatabaseError(_)
            | ServiceError::InternalServerError(_)
            | ServiceError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::OriginRejected(_) => "ORIGIN_NOT_ALLOWED",

            ServiceError::RouteNotFound(_) => "ROUTE_NOT_FOUND",
            ServiceError::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            ServiceError::InvalidDocumentId(_) => "INVALID_DOCUMENT_ID",

            ServiceError::ValidationError(_) => "VALIDATION_ERROR",
            ServiceError::InvalidInput(_) => "INVALID_INPUT",

            ServiceError::DatabaseError(_) => "DATABASE_ERROR",
            ServiceError::DatabaseConnectionError => "DATABASE_CONNECTION_ERROR",

            ServiceError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ServiceError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Convert error to JSON details for response
    pub fn to_details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::OriginRejected(origin) => Some(serde_json::json!({
                "origin": origin
            })),
            ServiceError::DocumentNotFound { collection, id } => Some(serde_json::json!({
                "collection": collection,
                "id": id
            })),
            _ => None,
        }
    }
}

/// Implement IntoResponse for Axum integration
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                status: status.as_u16(),
                details: self.to_details(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<OriginRejected> for ServiceError {
    fn from(err: OriginRejected) -> Self {
        ServiceError::OriginRejected(err.origin)
    }
}

/// Conversion from MongoDB driver errors
impl From<mongodb::error::Error> for ServiceError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            mongodb::error::ErrorKind::ServerSelection { .. } => {
                ServiceError::DatabaseConnectionError
            }
            _ => ServiceError::DatabaseError(err.to_string()),
        }
    }
}

/// Conversion from BSON encoding errors (request body -> document)
impl From<mongodb::bson::ser::Error> for ServiceError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

/// Conversion from validation errors
impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Type alias for Results using ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
