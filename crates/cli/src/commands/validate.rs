//! # CLI Validate Command
//!
//! Configuration validation for the orgtree CLI.

use error::{AppError, Result};
use tracing::info;

use crate::config::AppConfig;

/// Validates the loaded configuration
///
/// Parsing already rejected malformed numbers; this checks the values that
/// parse but cannot work.
pub fn validate(config: &AppConfig) -> Result<()> {
    let mut problems = Vec::new();

    if config.database.url.is_none() {
        if config.database.host.trim().is_empty() {
            problems.push("ORGTREE_DATABASE_HOST is empty");
        }
        if config.database.database.trim().is_empty() {
            problems.push("ORGTREE_DATABASE_NAME is empty");
        }
        if config.database.username.trim().is_empty() {
            problems.push("ORGTREE_DATABASE_USER is empty");
        }
    }
    if config.database.pool_size == 0 {
        problems.push("ORGTREE_DATABASE_POOL_SIZE must be at least 1");
    }

    if !problems.is_empty() {
        return Err(AppError::config(format!(
            "Invalid configuration: {}",
            problems.join("; ")
        )));
    }

    info!(
        target: "validate",
        database_url_set = config.database.url.is_some(),
        host = %config.database.host,
        database = %config.database.database,
        max_tree_depth = config.settings.max_tree_depth,
        "Configuration is valid"
    );
    Ok(())
}
