//! Error handling for the API server
//!
//! This module provides a unified error type that maps to HTTP responses.
//! Handlers return `Result<T, ApiError>` and every failure leaves the handler
//! as a JSON body of the form `{"error": "<message>"}`.
//!
//! # Status mapping
//!
//! | Variant      | Status | Body                                  |
//! |--------------|--------|---------------------------------------|
//! | `BadRequest` | 400    | the validation message                |
//! | `NotFound`   | 404    | the message                           |
//! | `Conflict`   | 409    | the message                           |
//! | `Store`      | 500    | `Database error: <store message>`     |
//! | `Internal`   | 500    | `Internal server error` (+ detail)    |
//! | `Rejected`   | varies | the extractor's rejection text        |
//!
//! # Example
//!
//! ```
//! use userreg_api::error::{ApiError, ApiResult};
//! use axum::Json;
//!
//! async fn handler(email: String) -> ApiResult<Json<String>> {
//!     if email.is_empty() {
//!         return Err(ApiError::BadRequest("Email is required".to_string()));
//!     }
//!     Ok(Json(email))
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use userreg_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - missing or malformed input
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email
    Conflict(String),

    /// Backing store failure (500)
    Store(StoreError),

    /// Anything else (500)
    Internal {
        /// What went wrong; always logged
        detail: String,

        /// Whether `detail` is appended to the response message
        expose_detail: bool,
    },

    /// Extractor rejection kept at its own status (e.g. 413 for oversized bodies)
    Rejected {
        /// Status chosen by the extractor
        status: StatusCode,

        /// Rejection text
        message: String,
    },
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    /// Internal error whose detail is logged but not returned
    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal {
            detail: detail.into(),
            expose_detail: false,
        }
    }

    /// Internal error whose detail is appended to the response message
    ///
    /// The detail follows "Internal server error" with no separator. Clients
    /// of the create endpoint match on that exact string.
    pub fn internal_with_detail(detail: impl Into<String>) -> Self {
        ApiError::Internal {
            detail: detail.into(),
            expose_detail: true,
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }

    /// Message placed in the response body
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Rejected { message: msg, .. } => msg.clone(),
            ApiError::Store(err) => format!("Database error: {}", err),
            ApiError::Internal {
                detail,
                expose_detail: true,
            } => format!("Internal server error{}", detail),
            ApiError::Internal { .. } => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Store(err) => write!(f, "Store error: {}", err),
            ApiError::Internal { detail, .. } => write!(f, "Internal error: {}", detail),
            ApiError::Rejected { status, message } => write!(f, "Rejected ({}): {}", status, message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(err) => tracing::error!(error = %err, "Store operation failed"),
            ApiError::Internal { detail, .. } => tracing::error!("Internal error: {}", detail),
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (self.status(), body).into_response()
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid email format".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid email format");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound(String::new()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict(String::new()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Store(StoreError::Backend("down".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Rejected {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                message: "length limit exceeded".to_string(),
            }
            .status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_store_error_message() {
        let err: ApiError = StoreError::Backend("table users-dev not found".to_string()).into();
        assert_eq!(err.message(), "Database error: table users-dev not found");
    }

    #[test]
    fn test_internal_error_messages() {
        assert_eq!(ApiError::internal("boom").message(), "Internal server error");
        assert_eq!(
            ApiError::internal_with_detail("boom").message(),
            "Internal server errorboom"
        );
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ApiError::Conflict("User with this email already exists".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "User with this email already exists" })
        );
    }
}
