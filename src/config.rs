//! Application configuration loaded from environment variables.
//!
//! All configuration is loaded from environment variables with defaults
//! suitable for development. A `.env` file is honored if present.
//!
//! # Security Configuration
//!
//! - `AUTH_TOKEN`: Shared bearer token every request must present
//!   (default: `TestToken`)
//!
//! # Limits
//!
//! - `MAX_REQUEST_BODY_SIZE`: Maximum request body size in bytes (default: 1MB)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Token accepted when `AUTH_TOKEN` is not set.
pub const DEFAULT_AUTH_TOKEN: &str = "TestToken";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 3000)
    pub port: u16,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    // =========================================================================
    // Security Configuration
    // =========================================================================
    /// Shared bearer token, compared after stripping `"Bearer "`
    pub auth_token: String,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Log filter (e.g., "info", "debug", "users_api=trace")
    pub log_level: String,

    /// Log output format (default: text)
    pub log_format: LogFormat,

    /// Port for Prometheus metrics endpoint (default: 9090, 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if any value is invalid
    /// (e.g., non-numeric PORT value, unknown LOG_FORMAT).
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 3000)?,
            max_request_body_size: Self::parse_env("MAX_REQUEST_BODY_SIZE", 1024 * 1024)?,

            auth_token: env::var("AUTH_TOKEN")
                .ok()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTH_TOKEN.to_string()),

            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: Self::parse_env("LOG_FORMAT", LogFormat::Text)?,
            metrics_port: Self::parse_env("METRICS_PORT", 9090)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    fn validate(&self) -> AppResult<()> {
        if self.max_request_body_size == 0 {
            return Err(AppError::ConfigError(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.auth_token.trim().is_empty() {
            return Err(AppError::ConfigError(
                "AUTH_TOKEN must not be blank".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address.
    ///
    /// Returns `None` if metrics are disabled (port = 0).
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_enabled()
            .then(|| SocketAddr::from(([0, 0, 0, 0], self.metrics_port)))
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .parse()
                .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_request_body_size: 1024 * 1024,
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_port: 9090,
        }
    }
}
