//! In-memory implementation of ResetTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::reset::PasswordResetToken;
use crate::errors::DomainError;

use super::r#trait::ResetTokenRepository;

/// Mock reset-token registry backed by a map keyed on token hash
///
/// `consume` holds the write lock across its check-and-flip, so concurrent
/// consumes of one token see exactly one success.
pub struct MockResetTokenRepository {
    tokens: Arc<RwLock<HashMap<String, PasswordResetToken>>>,
}

impl MockResetTokenRepository {
    /// Create a new empty mock registry
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockResetTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResetTokenRepository for MockResetTokenRepository {
    async fn save(&self, token: PasswordResetToken) -> Result<PasswordResetToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::Validation {
                message: "Reset token already exists".to_string(),
            });
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<Uuid>, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token_hash) {
            Some(token) if token.is_consumable() => {
                token.mark_used();
                Ok(Some(token.user_id))
            }
            _ => Ok(None),
        }
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| !token.is_expired());

        Ok(initial_count - tokens.len())
    }
}
