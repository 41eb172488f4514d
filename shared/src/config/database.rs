//! Database connection configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Database connection and pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/scoutline_dev"),
            max_connections: 10,
            acquire_timeout: 5,
        }
    }
}

impl DatabaseConfig {
    /// Create a configuration for a given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Override the pool size
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Load the database configuration from the environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("DATABASE_URL") {
            config.url = url;
        }
        if let Some(max) = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_connections = max;
        }
        config
    }
}
