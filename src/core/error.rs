//! Typed error handling for the HTTP surface
//!
//! Two layers:
//!
//! - [`QueryError`]: a query-string parameter was missing or malformed.
//!   These are the only errors the time-windowed listing produces itself.
//! - [`ApiError`]: everything a handler can return, each variant mapped to a
//!   status code and a JSON body with a human-readable `error` string.
//!
//! Storage and configuration plumbing below the handlers uses
//! `anyhow::Result`; failures from there surface as [`ApiError::Storage`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

/// A query-string parameter failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("created_after parameter is required")]
    MissingCreatedAfter,

    #[error("Invalid created_after date format. Please use ISO format.")]
    InvalidCreatedAfter,

    #[error("Limit must be an integer")]
    InvalidLimit,

    /// A date lookup parameter (e.g. `lookup_start_date`) did not parse
    #[error("Invalid {param} date format. Please use ISO format.")]
    InvalidDate { param: &'static str },
}

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Invalid id format")]
    InvalidId,

    #[error("Invalid request body")]
    InvalidBody { details: String },

    #[error("Validation failed")]
    FieldErrors(#[from] validator::ValidationErrors),

    /// A payload referenced a record that does not exist
    #[error("Invalid reference")]
    InvalidReference { field: &'static str, id: Uuid },

    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Query(_)
            | ApiError::InvalidId
            | ApiError::InvalidBody { .. }
            | ApiError::FieldErrors(_)
            | ApiError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        let message = self.to_string();
        match self {
            ApiError::InvalidBody { details } => json!({ "error": message, "details": details }),
            ApiError::FieldErrors(errors) => json!({ "error": message, "fields": errors }),
            ApiError::InvalidReference { field, id } => {
                json!({ "error": message, "field": field, "id": id })
            }
            _ => json!({ "error": message }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
