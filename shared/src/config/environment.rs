//! Environment detection

use serde::{Deserialize, Serialize};
use std::env;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Detect the environment from the `APP_ENV` variable
    ///
    /// Unknown or missing values fall back to `Development`.
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") => Environment::Staging,
            _ => Environment::Development,
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_development() {
        assert!(Environment::default().is_development());
        assert!(!Environment::default().is_production());
    }
}
