use std::time::Duration;

use anyhow::{Context, Result, ensure};
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Upper bound on open connections. One is enough for sequential use.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are loaded first if the file exists,
    /// then the process environment is deserialized into `Config`.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()
            .context("failed to read configuration (is DATABASE_URL set?)")?;

        config.validate().context("invalid configuration")
    }

    /// Reject values the connection pool cannot work with.
    pub fn validate(self) -> Result<Self> {
        ensure!(self.max_connections > 0, "MAX_CONNECTIONS must be at least 1");
        ensure!(
            self.acquire_timeout_secs > 0,
            "ACQUIRE_TIMEOUT_SECS must be at least 1"
        );
        Ok(self)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}
