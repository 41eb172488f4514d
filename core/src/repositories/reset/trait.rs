//! Password reset token registry trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::reset::PasswordResetToken;
use crate::errors::DomainError;

/// Registry of single-use password reset tokens, keyed by token hash
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    /// Insert a new reset token
    async fn save(&self, token: PasswordResetToken) -> Result<PasswordResetToken, DomainError>;

    /// Consume a reset token
    ///
    /// Checks existence, the used flag and the expiry, and flips used=true
    /// as one logical operation: two concurrent consumes of the same token
    /// must not both succeed. Implementations without transactional
    /// read-then-write must use a conditional update on `used = false`.
    ///
    /// # Returns
    /// * `Ok(Some(user_id))` - Token was live; it is now used
    /// * `Ok(None)` - Unknown, already used, or expired token
    async fn consume(&self, token_hash: &str) -> Result<Option<Uuid>, DomainError>;

    /// Delete expired reset tokens
    ///
    /// Housekeeping for an external scheduler.
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
