/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Types
 *
 * - `HandlerError` - Errors raised directly by HTTP handlers with an explicit status
 * - `Resolve` - Failures of the asset resolver
 * - `Store` - Failures of a persistence call outside the resolver
 * - `SharedError` - Validation failures from the shared module
 * - `InvalidBody` - A request body axum could not read as JSON
 *
 * # Status Mapping
 *
 * Invalid input of any kind maps to `400 Bad Request`. A failing primary store
 * maps to `500 Internal Server Error`; its details are logged, not returned.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::assets::{ResolveError, StoreError};
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit HTTP status
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    /// Asset resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A store call made by a handler failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Request body was missing, not JSON, or did not match the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl BackendError {
    /// Create a handler error with a status code and message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Resolve(ResolveError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Resolve(ResolveError::StoreFailure(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message returned to the client
    ///
    /// Server-side failures get a generic message so store details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Resolve(ResolveError::InvalidInput(err)) => err.to_string(),
            Self::Resolve(ResolveError::StoreFailure(_)) | Self::Store(_) => {
                "Internal server error".to_string()
            }
            Self::SharedError(err) => err.to_string(),
            Self::InvalidBody(rejection) => rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::UNAUTHORIZED, "login required");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "login required");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        let invalid: BackendError =
            ResolveError::InvalidInput(SharedError::validation("userId", "userId is required")).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let failed: BackendError =
            ResolveError::StoreFailure(StoreError::Unavailable("down".to_string())).into();
        assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let store: BackendError = StoreError::Unavailable("pool closed".to_string()).into();
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_details_are_not_exposed() {
        let error: BackendError =
            ResolveError::StoreFailure(StoreError::Unavailable("10.0.0.5 refused".to_string())).into();
        assert!(!error.message().contains("10.0.0.5"));
    }

    #[test]
    fn test_from_shared_error() {
        let shared_error = SharedError::validation("nickname", "nickname is required");
        let backend_error: BackendError = shared_error.into();

        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
        assert!(backend_error.message().contains("nickname is required"));
    }

    #[tokio::test]
    async fn test_body_rejection_is_bad_request() {
        use axum::body::Body;
        use axum::extract::FromRequest;
        use axum::http::Request;
        use axum::Json;

        let rejection = Json::<serde_json::Value>::from_request(Request::new(Body::empty()), &())
            .await
            .unwrap_err();
        let error: BackendError = rejection.into();

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert!(error.message().contains("Content-Type"));
    }
}
