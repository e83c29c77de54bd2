//! # Request Handlers
//!
//! Each handler takes the application state and already-extracted input, and
//! returns the JSON payload. Routing and status codes live in [`crate::router`].

pub mod departments;
pub mod employees;
