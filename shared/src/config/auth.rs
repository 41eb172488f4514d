//! Authentication configuration

use serde::{Deserialize, Serialize};
use std::env;

use super::environment::Environment;

/// JWT signing configuration
///
/// Constructed once at process start; the token service and the access guard
/// receive it by reference instead of reading the environment ad hoc.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("change-me-in-production"),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 2_592_000, // 30 days
            issuer: String::from("scoutline"),
            audience: String::from("scoutline-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load the JWT configuration from the environment
    ///
    /// `JWT_SECRET` is required; expiry overrides are optional.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secret) = env::var("JWT_SECRET") {
            config.secret = secret;
        }
        if let Some(seconds) = env_i64("JWT_ACCESS_TOKEN_EXPIRY") {
            config.access_token_expiry = seconds;
        }
        if let Some(seconds) = env_i64("JWT_REFRESH_TOKEN_EXPIRY") {
            config.refresh_token_expiry = seconds;
        }
        config
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "change-me-in-production"
    }
}

/// Refresh-token cookie configuration
///
/// Only the cookie's contents and lifetime are defined by the auth core;
/// the attributes here follow the serving environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Path scope, restricted to the auth API prefix
    pub path: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("refresh_token"),
            path: String::from("/api/v1/auth"),
            secure: false,
        }
    }
}

impl CookieConfig {
    /// Build cookie settings for a given environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            secure: env.is_production(),
            ..Default::default()
        }
    }
}

/// Password-reset token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResetTokenConfig {
    /// Reset token expiry time in seconds
    pub expiry: i64,
}

impl Default for ResetTokenConfig {
    fn default() -> Self {
        Self {
            expiry: 900, // 15 minutes
        }
    }
}

fn env_i64(key: &str) -> Option<i64> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
