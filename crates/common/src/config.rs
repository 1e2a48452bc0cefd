//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which store backend the services run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    Memory,
    Postgres,
}

impl FromStr for StoreProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreProvider::Memory),
            "postgres" | "postgresql" => Ok(StoreProvider::Postgres),
            other => Err(anyhow::anyhow!("Unsupported store provider: {}", other)),
        }
    }
}

impl fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreProvider::Memory => write!(f, "memory"),
            StoreProvider::Postgres => write!(f, "postgres"),
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unsupported log format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store backend selection
    pub store_provider: StoreProvider,

    /// Database connection URL, required for the postgres backend
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub run_migrations: bool,

    /// Runtime configuration
    pub log_format: LogFormat,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_provider: StoreProvider::Memory,
            database_url: None,
            database_max_connections: 5,
            run_migrations: true,
            log_format: LogFormat::Pretty,
            rust_log: "touchline=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let store_provider = match env::var("STORE_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => StoreProvider::Memory,
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        if store_provider == StoreProvider::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required when STORE_PROVIDER=postgres"
            ));
        }

        let config = Self {
            store_provider,
            database_url,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a number"))?,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            log_format: match env::var("LOG_FORMAT") {
                Ok(value) => value.parse()?,
                Err(_) => LogFormat::Pretty,
            },
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "touchline=info".to_string()),
        };

        Ok(config)
    }

    /// Configuration for an in-memory store, used by tests and local runs
    pub fn in_memory() -> Self {
        Self::default()
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
