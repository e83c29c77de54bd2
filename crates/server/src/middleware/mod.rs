//! # HTTP Middleware
//!
//! Custom middleware for request processing.

pub mod request_log;
pub mod security_headers;
pub mod timeout;
