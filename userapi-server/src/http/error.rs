//! API error types with IntoResponse
//!
//! Errors are converted to `{success: false, error, message?}` JSON bodies
//! with the matching status code. Every error is logged before conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Write rejected by a uniqueness constraint (409)
    Conflict { message: &'static str },

    /// Any other store failure (500, store message forwarded)
    Database(DbError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (StatusCode::BAD_REQUEST, ErrorBody::new(e.to_string()))
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(resource = *resource, id = %id, "lookup matched no rows");
                (
                    StatusCode::NOT_FOUND,
                    ErrorBody::new(format!("{} not found", capitalize(resource))),
                )
            }
            Self::Conflict { message } => {
                tracing::warn!("Conflict: {}", message);
                (StatusCode::CONFLICT, ErrorBody::new(*message))
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        success: false,
                        error: "Database connection failed".to_owned(),
                        message: Some(e.store_message()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}
