//! Password hashing and verification.
//!
//! The plaintext password never leaves this module's arguments; it is not
//! logged or embedded in errors on any path.

use crate::errors::{DomainError, DomainResult};

/// bcrypt work factor
pub const HASH_COST: u32 = 10;

/// Hash a password with a per-call random salt
pub fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, HASH_COST).map_err(|_| DomainError::Internal {
        message: "Password hashing failed".to_string(),
    })
}

/// Verify a password against a stored hash
///
/// A malformed hash is a verification failure, not an error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("password123").unwrap();

        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_salt_is_random_per_call() {
        let first = hash_password("password123").unwrap();
        let second = hash_password("password123").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("password123", &first));
        assert!(verify_password("password123", &second));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_password("password123", "not-a-bcrypt-hash"));
        assert!(!verify_password("password123", ""));
    }
}
