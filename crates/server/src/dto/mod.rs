//! # Data Transfer Objects Module
//!
//! Request and response types for API endpoints.

pub mod departments;
pub mod employees;
