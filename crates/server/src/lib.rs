//! # Orgtree API Server
//!
//! Axum-based HTTP API for the organizational department tree.
//!
//! ## Modules
//!
//! - [`org`]: Validation, cycle checks, subtree assembly and deletion
//! - [`dto`]: Request/response data transfer objects
//! - [`handlers`]: Endpoint handlers
//! - [`middleware`]: HTTP middleware (request ids, timeouts, security headers)
//! - [`router`]: API route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod org;
pub mod router;
pub mod settings;

pub use router::create_app_router;
pub use settings::Settings;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:       sea_orm::DbConn,
    /// Request limits
    pub settings: Settings,
}

impl AppState {
    #[must_use]
    pub fn new(db: sea_orm::DbConn, settings: Settings) -> Self {
        Self {
            db,
            settings,
        }
    }
}
