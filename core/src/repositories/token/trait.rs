//! Refresh token registry trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Registry of refresh-token leases, keyed by rotation id (`jti`)
///
/// Every refresh and logout is checked against this server-side state; the
/// signed payload alone is never trusted.
///
/// # Concurrency
/// `revoke` must be a conditional flip (revoked=false → true) so that of two
/// concurrent rotations of the same lease exactly one observes the flip.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a new lease
    ///
    /// Every issuance is an insert; a duplicate `jti` is a store error,
    /// never an update.
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a lease by rotation id
    async fn find_by_jti(&self, jti: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Check whether a presented refresh token is backed by a live lease
    ///
    /// True only if all of the following hold: a record with that `jti`
    /// exists, it is not revoked, it belongs to `user_id`, it has not
    /// expired, and its stored hash equals `token_hash`. Any single failing
    /// condition yields false.
    async fn validate(
        &self,
        jti: Uuid,
        token_hash: &str,
        user_id: Uuid,
    ) -> Result<bool, DomainError> {
        match self.find_by_jti(jti).await? {
            Some(record) => Ok(record.is_active()
                && record.user_id == user_id
                && record.token_hash == token_hash),
            None => Ok(false),
        }
    }

    /// Revoke a lease
    ///
    /// # Returns
    /// * `Ok(true)` - This call flipped the revoked flag
    /// * `Ok(false)` - Unknown or already-revoked `jti` (a no-op, not an error)
    async fn revoke(&self, jti: Uuid) -> Result<bool, DomainError>;

    /// Revoke every lease belonging to a user
    ///
    /// Used when a credential rotation (password change or reset) must tear
    /// down outstanding sessions.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of leases revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete expired leases
    ///
    /// Housekeeping for an external scheduler; expired leases are already
    /// inert without it.
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
