//! # Rejection Handlers
//!
//! Conversions from Axum extractor rejections into [`AppError::BadRequest`].
//!
//! Handlers take `Result<Json<T>, JsonRejection>` (and the query/path
//! equivalents) and forward the rejection with `?`, so malformed input is
//! reported in the standard `{"error": ...}` format instead of Axum's
//! plain-text default.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::AppError;

/// Pull a friendlier message out of serde's "missing field" wording.
///
/// `missing field `name` at line 1 column 2` becomes
/// `missing required field: name`.
fn describe_json_error(error_message: &str) -> String {
    const MARKER: &str = "missing field `";

    if let Some(start) = error_message.find(MARKER) {
        let rest = &error_message[start + MARKER.len() ..];
        if let Some(end) = rest.find('`') {
            return format!("missing required field: {}", &rest[.. end]);
        }
    }
    format!("invalid request body: {}", error_message)
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self { AppError::bad_request(describe_json_error(&rejection.body_text())) }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!("invalid query string: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(format!("invalid path parameter: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_named() {
        let message = describe_json_error(
            "Failed to deserialize the JSON body into the target type: missing field `full_name` at line 1 column 20",
        );
        assert_eq!(message, "missing required field: full_name");
    }

    #[test]
    fn test_other_errors_are_prefixed() {
        let message = describe_json_error("expected value at line 1 column 1");
        assert_eq!(
            message,
            "invalid request body: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_unterminated_marker_falls_back() {
        let message = describe_json_error("missing field `oops");
        assert!(message.starts_with("invalid request body"));
    }
}
