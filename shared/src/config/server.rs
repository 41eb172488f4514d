//! HTTP server configuration

use serde::{Deserialize, Serialize};
use std::env;

/// HTTP server bind configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Create a configuration for a given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Load the server configuration from the environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = env::var("SERVER_HOST") {
            config.host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()) {
            config.port = port;
        }
        config
    }

    /// The address to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
