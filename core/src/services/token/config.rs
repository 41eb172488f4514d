//! Token service configuration

use sl_shared::config::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};

/// Configuration for the token service
///
/// Built once at process start from [`JwtConfig`]; the service never reads
/// the environment itself.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret used for HS256 signing
    pub jwt_secret: String,

    /// Access token expiry in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry in seconds
    pub refresh_token_expiry: i64,

    /// Issuer claim
    pub issuer: String,

    /// Audience claim
    pub audience: String,
}

impl TokenServiceConfig {
    /// Create a configuration with a secret and the default TTLs
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_expiry: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            refresh_token_expiry: REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
