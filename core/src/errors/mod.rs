//! Domain-specific error types and error handling.
//!
//! Components return typed errors at their boundaries; normalization to the
//! coarse HTTP-facing taxonomy happens once, in the API layer.

use thiserror::Error;

/// Authentication-related errors
///
/// Deliberately coarse where enumeration matters: a wrong password and an
/// unknown email both surface as `AuthenticationFailed`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    AuthenticationFailed,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Wrong token type")]
    WrongTokenType,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;
