//! Password reset token entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reset token expiration time (15 minutes)
pub const RESET_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Single-use, time-boxed token authorizing one password change
///
/// Only the hash of the opaque token is persisted; the plaintext goes to the
/// user and is never stored or logged. The used flag flips once and a used
/// or expired token never authorizes a change again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    /// SHA-256 hash of the opaque token string
    #[serde(skip_serializing)]
    pub token_hash: String,

    /// User this token was issued for
    pub user_id: Uuid,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has already authorized a change
    pub used: bool,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Creates a new unused token
    pub fn new(user_id: Uuid, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            token_hash,
            user_id,
            expires_at: now + ttl,
            used: false,
            created_at: now,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the token may still authorize a password change
    pub fn is_consumable(&self) -> bool {
        !self.used && !self.is_expired()
    }

    /// Marks the token as used
    pub fn mark_used(&mut self) {
        self.used = true;
    }
}
