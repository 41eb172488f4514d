//! Domain entities representing core business objects.

pub mod reset;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use reset::{PasswordResetToken, RESET_TOKEN_EXPIRY_MINUTES};
pub use token::{
    Claims, RefreshTokenRecord, TokenPair, TokenType, ACCESS_TOKEN_EXPIRY_MINUTES,
    JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{User, UserRole};
