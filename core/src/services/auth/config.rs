//! Authentication service configuration

use sl_shared::config::ResetTokenConfig;

use crate::domain::entities::reset::RESET_TOKEN_EXPIRY_MINUTES;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Password reset token expiry in seconds
    pub reset_token_expiry: i64,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            reset_token_expiry: RESET_TOKEN_EXPIRY_MINUTES * 60,
        }
    }
}

impl From<&ResetTokenConfig> for AuthServiceConfig {
    fn from(config: &ResetTokenConfig) -> Self {
        Self {
            reset_token_expiry: config.expiry,
        }
    }
}
