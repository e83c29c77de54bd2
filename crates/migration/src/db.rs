//! # Database Connection Management
//!
//! Connection settings and pool setup shared by the CLI commands and the
//! HTTP server. A full `DATABASE_URL` wins over the individual settings.

use std::{str::FromStr, time::Duration};

use ::error::{AppError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Full connection URL, used verbatim when present
    pub url:               Option<String>,
    /// Database host address
    pub host:              String,
    /// Database port number
    pub port:              u16,
    /// Database name
    pub database:          String,
    /// Database username
    pub username:          String,
    /// Database password
    pub password:          String,
    /// SSL mode for connection
    pub ssl_mode:          SslMode,
    /// Maximum connections in pool
    pub pool_size:         u32,
    /// Connection timeout in seconds
    pub connect_timeout:   u64,
    /// Statement timeout in seconds
    pub statement_timeout: Option<u64>,
}

/// SSL mode options for PostgreSQL connections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    /// No SSL
    Disable,
    /// Prefer SSL if available
    #[default]
    Prefer,
    /// Require SSL connection
    Require,
    /// Verify SSL certificate
    VerifyCa,
    /// Verify full SSL certificate chain
    VerifyFull,
}

impl SslMode {
    /// Converts the SSL mode to a PostgreSQL connection string value
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for SslMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(AppError::config(format!("unknown ssl mode: {}", other))),
        }
    }
}

impl DatabaseConfig {
    /// Creates a new configuration with local development defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            url:               None,
            host:              "localhost".to_string(),
            port:              5432,
            database:          "orgtree".to_string(),
            username:          "orgtree".to_string(),
            password:          String::new(),
            ssl_mode:          SslMode::Prefer,
            pool_size:         10,
            connect_timeout:   30,
            statement_timeout: None,
        }
    }

    /// Uses a complete connection URL instead of the individual settings
    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Sets the database host
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Sets the database port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database name
    #[must_use]
    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    /// Sets the database username
    #[must_use]
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    /// Sets the database password
    #[must_use]
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// Sets the SSL mode
    #[must_use]
    pub fn with_ssl_mode(mut self, ssl_mode: SslMode) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    /// Sets the connection pool size
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the connection timeout in seconds
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: u64) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the statement timeout in seconds (None for no timeout)
    #[must_use]
    pub fn with_statement_timeout(mut self, timeout: Option<u64>) -> Self {
        self.statement_timeout = timeout;
        self
    }

    /// Loads configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `DATABASE_URL` (optional, overrides everything below)
    /// - `ORGTREE_DATABASE_HOST` (default: "localhost")
    /// - `ORGTREE_DATABASE_PORT` (default: "5432")
    /// - `ORGTREE_DATABASE_NAME` (default: "orgtree")
    /// - `ORGTREE_DATABASE_USER` (default: "orgtree")
    /// - `ORGTREE_DATABASE_PASSWORD` (default: "")
    /// - `ORGTREE_DATABASE_SSL_MODE` (default: "prefer")
    /// - `ORGTREE_DATABASE_POOL_SIZE` (default: "10")
    /// - `ORGTREE_DATABASE_CONNECT_TIMEOUT` (default: "30")
    /// - `ORGTREE_DATABASE_STATEMENT_TIMEOUT` (optional)
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a numeric value or the SSL mode does not parse.
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new();
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mut config = Self::new()
            .with_host(&get("ORGTREE_DATABASE_HOST", &defaults.host))
            .with_port(parse_number(
                "ORGTREE_DATABASE_PORT",
                lookup("ORGTREE_DATABASE_PORT"),
                defaults.port,
            )?)
            .with_database(&get("ORGTREE_DATABASE_NAME", &defaults.database))
            .with_username(&get("ORGTREE_DATABASE_USER", &defaults.username))
            .with_password(&get("ORGTREE_DATABASE_PASSWORD", &defaults.password))
            .with_ssl_mode(get("ORGTREE_DATABASE_SSL_MODE", defaults.ssl_mode.as_str()).parse()?)
            .with_pool_size(parse_number(
                "ORGTREE_DATABASE_POOL_SIZE",
                lookup("ORGTREE_DATABASE_POOL_SIZE"),
                defaults.pool_size,
            )?)
            .with_connect_timeout(parse_number(
                "ORGTREE_DATABASE_CONNECT_TIMEOUT",
                lookup("ORGTREE_DATABASE_CONNECT_TIMEOUT"),
                defaults.connect_timeout,
            )?);

        if let Some(raw) = lookup("ORGTREE_DATABASE_STATEMENT_TIMEOUT") {
            config = config.with_statement_timeout(Some(parse_number(
                "ORGTREE_DATABASE_STATEMENT_TIMEOUT",
                Some(raw),
                0,
            )?));
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            config = config.with_url(url.trim());
        }

        Ok(config)
    }

    /// Builds the connection string for Sea-ORM
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let mut url = format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            percent_encode_userinfo(&self.username),
            percent_encode_userinfo(&self.password),
            self.host,
            self.port,
            self.database,
            self.ssl_mode.as_str()
        );
        if let Some(seconds) = self.statement_timeout {
            url.push_str(&format!(
                "&options=-c%20statement_timeout%3D{}",
                seconds.saturating_mul(1000)
            ));
        }
        url
    }

    /// Opens a connection pool from this configuration
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection fails.
    pub async fn connect(&self) -> Result<DatabaseConnection> {
        let mut options = ConnectOptions::new(self.connection_url());
        options
            .max_connections(self.pool_size.max(1))
            .min_connections(1)
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        info!(pool_size = self.pool_size, "Database connection established");
        Ok(db)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self { Self::new() }
}

fn parse_number<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => {
            value
                .trim()
                .parse()
                .map_err(|_| AppError::config(format!("{} must be a number, got '{}'", key, value)))
        },
    }
}

/// Percent-encodes a username or password for use in a URI's userinfo.
///
/// Unreserved characters pass through; everything else is emitted as its
/// UTF-8 bytes.
fn percent_encode_userinfo(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut result = String::with_capacity(s.len().saturating_mul(3));
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
            result.push(c);
        }
        else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).as_bytes() {
                result.push('%');
                result.push(HEX[(byte >> 4) as usize] as char);
                result.push(HEX[(byte & 15) as usize] as char);
            }
        }
    }
    result
}
