//! # ScoutLine Core
//!
//! Core business logic and domain layer for the ScoutLine backend.
//! This crate contains domain entities, authentication services, repository
//! interfaces, and error types that form the foundation of the application
//! architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, PasswordResetToken, RefreshTokenRecord, TokenPair, TokenType, User, UserRole,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{ResetTokenRepository, TokenRepository, UserRepository};
pub use services::{AuthService, TokenService};
