//! Typed error handling for the CreditScan domains
//!
//! Every layer (repository, service, use case) returns [`DomainError`].
//! Repositories raise the errors, services and use cases propagate them
//! unchanged with `?`, and the HTTP boundary converts them into status codes
//! through the [`IntoResponse`] implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.get_by_id(&id).await {
//!     Ok(statement) => println!("Found: {:?}", statement),
//!     Err(DomainError::NotFound { entity, id }) => {
//!         println!("{} {} not found", entity, id);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Result alias used throughout the domain layers
pub type DomainResult<T> = Result<T, DomainError>;

/// Base error for every domain operation
#[derive(Debug, Clone)]
pub enum DomainError {
    /// The requested identifier does not exist
    NotFound { entity: &'static str, id: Uuid },

    /// The payload or query is malformed or violates a domain rule
    InvalidData {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The operation would break uniqueness or referential integrity
    Conflict { message: String },

    /// The caller is authenticated but may not touch this record
    Forbidden { message: String },

    /// No usable caller identity was supplied
    Unauthorized { message: String },

    /// The persisted store failed (poisoned lock, backend error)
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidData {
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        DomainError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::InvalidData { .. } => StatusCode::BAD_REQUEST,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
            DomainError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            DomainError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::InvalidData { .. } => "INVALID_DATA",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::Forbidden { .. } => "FORBIDDEN",
            DomainError::Unauthorized { .. } => "UNAUTHORIZED",
            DomainError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Check whether this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DomainError::NotFound { entity, id } => Some(serde_json::json!({
                "entity": entity,
                "id": id.to_string()
            })),
            DomainError::InvalidData { details, .. } => details.clone(),
            _ => None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound { entity, id } => {
                write!(f, "{} with id '{}' not found", entity, id)
            }
            DomainError::InvalidData { message, .. } => write!(f, "Invalid data: {}", message),
            DomainError::Conflict { message } => write!(f, "Conflict: {}", message),
            DomainError::Forbidden { message } => write!(f, "Forbidden: {}", message),
            DomainError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            DomainError::Storage { message } => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for DomainError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, serde_json::Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), serde_json::json!(messages))
            })
            .collect();

        DomainError::InvalidData {
            message: "validation failed".to_string(),
            details: Some(serde_json::json!({ "fields": fields })),
        }
    }
}
