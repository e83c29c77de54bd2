//! # Server Settings
//!
//! Runtime limits for the HTTP layer, read from the environment.

use std::time::Duration;

use error::{AppError, Result};

/// Upper bound of the `depth` query parameter when nothing is configured.
pub const DEFAULT_MAX_TREE_DEPTH: u32 = 5;
/// Hard ceiling on the configurable depth; rendering recurses once per level.
pub const MAX_TREE_DEPTH_CEILING: u32 = 32;
/// Per-request deadline when nothing is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Server settings shared by every handler through [`crate::AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Largest accepted `depth` for subtree reads
    pub max_tree_depth:  u32,
    /// Deadline applied to every request
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_tree_depth:  DEFAULT_MAX_TREE_DEPTH,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Reads `ORGTREE_MAX_TREE_DEPTH` and `ORGTREE_REQUEST_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when either value is not a number.
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Same as [`Settings::from_env`] with an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup("ORGTREE_MAX_TREE_DEPTH") {
            let depth: u32 = raw.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "ORGTREE_MAX_TREE_DEPTH must be a positive integer, got '{}'",
                    raw
                ))
            })?;
            settings.max_tree_depth = depth.clamp(1, MAX_TREE_DEPTH_CEILING);
        }

        if let Some(raw) = lookup("ORGTREE_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "ORGTREE_REQUEST_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    raw
                ))
            })?;
            settings.request_timeout = Duration::from_secs(secs.max(1));
        }

        Ok(settings)
    }
}
