//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (optional; without it slots
//!   are kept in memory)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: HTTP request timeout (default: 30)
//! - `STORE_OPERATION_TIMEOUT_MS`: Timeout of a single backing call (default: 10000)
//! - `STORE_QUEUE_CAPACITY`: Depth of the store command queue (default: 64)
//! - `MEMORY_BACKEND_LATENCY_MS`: Simulated latency of the in-memory backend (default: 0)
//! - `SEED_DEMO_SLOTS`: Seed the in-memory backend with demo slots; accepts
//!   `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` (default: false)
//! - `MAX_RANGE_DAYS`: Longest span a bulk range request may cover (default: 366)
//! - `MAX_DAILY_TEMPLATES`: Most templates a bulk range request may carry (default: 48)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use eyre::{Result, WrapErr};
use slotbook_core::models::schedule::RangeLimits;
use slotbook_store::StoreConfig;
use tracing::Level;

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL connection string; `None` selects the in-memory backend
    pub database_url: Option<String>,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Upper bound on a single backing call
    pub store_operation_timeout: Duration,

    /// Commands that may wait in the store queue
    pub store_queue_capacity: usize,

    /// Simulated round trip of the in-memory backend
    pub memory_latency: Duration,

    /// Whether the in-memory backend starts with demo slots
    pub seed_demo_slots: bool,

    /// Longest span, in days, of one bulk range request
    pub max_range_days: u64,

    /// Most daily templates in one bulk range request
    pub max_daily_templates: usize,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - A numeric store or backend setting cannot be parsed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let log_level = parse_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Store settings
        let store_operation_timeout =
            Duration::from_millis(var_or("STORE_OPERATION_TIMEOUT_MS", 10_000)?);
        let store_queue_capacity = var_or("STORE_QUEUE_CAPACITY", 64)?;

        // In-memory backend settings
        let memory_latency = Duration::from_millis(var_or("MEMORY_BACKEND_LATENCY_MS", 0)?);
        let seed_demo_slots = match env::var("SEED_DEMO_SLOTS") {
            Ok(value) => parse_flag(&value)
                .ok_or_else(|| eyre::eyre!("Invalid SEED_DEMO_SLOTS value: {}", value))?,
            Err(_) => false,
        };

        // Bulk range limits
        let defaults = RangeLimits::default();
        let max_range_days = var_or("MAX_RANGE_DAYS", defaults.max_days)?;
        let max_daily_templates = var_or("MAX_DAILY_TEMPLATES", defaults.max_templates)?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            store_operation_timeout,
            store_queue_capacity,
            memory_latency,
            seed_demo_slots,
            max_range_days,
            max_daily_templates,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn range_limits(&self) -> RangeLimits {
        RangeLimits {
            max_days: self.max_range_days,
            max_templates: self.max_daily_templates,
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            operation_timeout: self.store_operation_timeout,
            queue_capacity: self.store_queue_capacity,
        }
    }
}

fn parse_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn var_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value", name)),
        Err(_) => Ok(default),
    }
}
