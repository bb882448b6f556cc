//! Error types for the memo server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Server Error Enum ==
/// Unified error type for the memo server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// A capacity, TTL or concurrency limit was not positive
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The processing function failed; nothing was cached
    #[error("Computation failed for key '{key}': {source}")]
    Computation {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The admission controller was closed while a request waited for a permit
    #[error("Admission controller is closed")]
    AdmissionClosed,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServerError {
    /// Wraps a failure of the processing function for `key`.
    pub fn computation(key: impl Into<String>, source: anyhow::Error) -> Self {
        ServerError::Computation {
            key: key.into(),
            source: source.into(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Computation { .. } => StatusCode::BAD_GATEWAY,
            ServerError::AdmissionClosed => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the memo server.
pub type Result<T> = std::result::Result<T, ServerError>;
