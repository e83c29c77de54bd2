//! # Error Response Body
//!
//! The JSON shape returned for every failed request:
//!
//! ```json
//! { "error": "department not found" }
//! ```

use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
}

impl ErrorBody {
    /// Create a new error body.
    #[inline]
    pub fn new(message: impl ToString) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
