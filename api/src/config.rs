//! Process configuration, assembled once at startup

use sl_shared::config::{
    CookieConfig, DatabaseConfig, Environment, JwtConfig, ResetTokenConfig, ServerConfig,
};

/// Complete API configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub reset_token: ResetTokenConfig,
}

impl Config {
    /// Load the full configuration from the environment
    ///
    /// This is the only place the process reads environment variables;
    /// everything downstream receives the resulting structs.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::for_environment(environment),
            reset_token: ResetTokenConfig::default(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            cookie: CookieConfig::default(),
            reset_token: ResetTokenConfig::default(),
        }
    }
}
