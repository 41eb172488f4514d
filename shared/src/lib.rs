//! Shared utilities and common types for the ScoutLine server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types
//! - Common response structures

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    CookieConfig, DatabaseConfig, Environment, JwtConfig, ResetTokenConfig, ServerConfig,
};
pub use types::{ErrorBody, MessageResponse};
