//! # Error Rendering
//!
//! Converts [`AppError`] values into HTTP responses.
//!
//! ## Usage
//!
//! ```rust
//! use error::{middleware::ErrorHandler, AppError};
//!
//! let handler = ErrorHandler::new(false);
//! let error = AppError::not_found("department not found");
//! let response = handler.to_response(&error);
//! assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
//! ```

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{response::ErrorBody, AppError};

/// Error handler that converts errors to HTTP responses.
#[derive(Clone, Debug)]
pub struct ErrorHandler {
    /// Whether to expose server-side error details in the response body.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    ///
    /// Client errors always carry their message. Server errors are logged and,
    /// unless `include_details` is set, replaced by a generic message.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();

        if status.is_server_error() {
            tracing::error!(code = err.code(), error = %err, "Request failed");
        }
        else {
            tracing::debug!(code = err.code(), error = %err, "Request rejected");
        }

        let message = if self.include_details || !status.is_server_error() {
            err.message().to_string()
        }
        else {
            match status {
                StatusCode::GATEWAY_TIMEOUT => "request timed out".to_string(),
                _ => "internal server error".to_string(),
            }
        };

        let mut res = (status, Json(ErrorBody::new(message))).into_response();
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        res
    }
}

impl Default for ErrorHandler {
    fn default() -> Self { Self::new(false) }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response { ErrorHandler::default().to_response(&self) }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let response = AppError::not_found("department not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "department not found"})
        );
    }

    #[tokio::test]
    async fn test_conflict_response() {
        let response = AppError::conflict("cannot move department inside its own subtree").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await["error"],
            "cannot move department inside its own subtree"
        );
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = AppError::database("relation \"departments\" does not exist").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "internal server error");
    }

    #[tokio::test]
    async fn test_error_handler_with_details() {
        let handler = ErrorHandler::new(true);
        let response = handler.to_response(&AppError::internal("Detailed error message"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Detailed error message");
    }

    #[tokio::test]
    async fn test_timeout_response() {
        let response = AppError::timeout("deadline of 10s exceeded").into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body_json(response).await["error"], "request timed out");
    }
}
