//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::UtcTime},
    layer::Layered,
    prelude::*,
    EnvFilter,
    Layer,
    Registry,
};

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (debug, info, `info,sqlx=warn`)
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file path
    #[serde(default)]
    pub log_file: Option<String>,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "json".to_string() }

fn default_environment() -> String { "development".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:       default_level(),
            format:      default_format(),
            log_file:    None,
            environment: default_environment(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// `RUST_LOG`, `ORGTREE_LOG_FORMAT`, `ORGTREE_LOG_FILE` and `ORGTREE_ENV`
    /// take precedence over the arguments.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level:       std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
            format:      std::env::var("ORGTREE_LOG_FORMAT").unwrap_or_else(|_| format.to_string()),
            log_file:    std::env::var("ORGTREE_LOG_FILE")
                .ok()
                .or(log_file.map(|s| s.to_string())),
            environment: std::env::var("ORGTREE_ENV").unwrap_or_else(|_| default_environment()),
        }
    }

    /// The filter built from `level`, falling back to `info` when it does not parse.
    pub fn env_filter(&self) -> EnvFilter { EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info")) }

    /// Build the tracing subscriber from this configuration.
    ///
    /// Unknown formats fall back to JSON. When `log_file` is set, a JSON copy
    /// of every event is also written to an hourly rotated file.
    pub fn build(&self) -> (Box<dyn tracing::Subscriber + Send + Sync>, Option<WorkerGuard>) {
        let mut layers: Vec<BoxedLayer> = vec![self.stdout_layer()];

        let guard = match self.log_file.as_deref() {
            Some(log_file) => {
                let (layer, guard) = Self::file_layer(log_file);
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        let subscriber = Registry::default().with(self.env_filter()).with(layers);
        (Box::new(subscriber), guard)
    }

    fn stdout_layer(&self) -> BoxedLayer {
        match self.format.as_str() {
            "pretty" => {
                fmt::layer()
                    .pretty()
                    .with_timer(UtcTime::rfc_3339())
                    .boxed()
            },
            "compact" => {
                fmt::layer()
                    .compact()
                    .with_timer(UtcTime::rfc_3339())
                    .boxed()
            },
            _ => {
                fmt::layer()
                    .json()
                    .with_timer(UtcTime::rfc_3339())
                    .boxed()
            },
        }
    }

    fn file_layer(log_file: &str) -> (BoxedLayer, WorkerGuard) {
        let path = Path::new(log_file);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "orgtree.log".to_string());

        let file_appender = tracing_appender::rolling::hourly(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(non_blocking)
            .boxed();
        (layer, guard)
    }
}
