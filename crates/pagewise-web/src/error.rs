//! Error responses.
//!
//! [`ApiError`] carries an HTTP status and a message and renders as
//! `{"error": {"message": ..., "status": ...}}`. Engine errors convert into
//! it so handlers can use `?` on sort and conversion results.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pagewise::ConvertError;
use serde_json::json;
use thiserror::Error;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error rendered as a JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

// Both engine failures are caused by the request.
impl From<pagewise::Error> for ApiError {
    fn from(err: pagewise::Error) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}
