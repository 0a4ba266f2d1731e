//! # Configuration
//!
//! Settings are read from environment variables (a `.env` file is honoured by
//! the binaries through `dotenv`).
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `DB_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `CALENDAR_SCOPE`: Scope name used by `slot-calendar` (default: current_or_upcoming)
//! - `CALENDAR_LOCATION_ID`: Restrict `slot-calendar` to one location

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// Maximum number of pooled database connections
    pub max_connections: u32,

    /// Scope name passed to the calendar export
    pub calendar_scope: Option<String>,

    /// Location filter for the calendar export
    pub calendar_location_id: Option<Uuid>,
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - DB_MAX_CONNECTIONS is set but is not a positive integer
    /// - CALENDAR_LOCATION_ID is set but is not a UUID
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        let max_connections: u32 = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;
        if max_connections == 0 {
            eyre::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let calendar_scope = env::var("CALENDAR_SCOPE").ok().filter(|s| !s.is_empty());

        let calendar_location_id = env::var("CALENDAR_LOCATION_ID")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Uuid>())
            .transpose()
            .wrap_err("Invalid CALENDAR_LOCATION_ID value")?;

        Ok(Self {
            database_url,
            log_level,
            max_connections,
            calendar_scope,
            calendar_location_id,
        })
    }
}

pub fn parse_log_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
