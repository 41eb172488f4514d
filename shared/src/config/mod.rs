//! Configuration module with business-specific sub-modules
//!
//! Configuration is loaded once at process start and handed to the services
//! that need it; business logic never reads the environment directly.
//!
//! - `auth` - JWT signing, refresh cookie and reset-token configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server bind configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

// Re-export commonly used types
pub use auth::{CookieConfig, JwtConfig, ResetTokenConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;
