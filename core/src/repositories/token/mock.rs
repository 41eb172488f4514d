//! In-memory implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock refresh-token registry backed by a map keyed on `jti`
///
/// `revoke` performs its check-and-flip under the write lock, matching the
/// compare-and-set contract of the real store.
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<Uuid, RefreshTokenRecord>>>,
}

impl MockTokenRepository {
    /// Create a new empty mock registry
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.jti) {
            return Err(DomainError::Validation {
                message: "Lease already exists".to_string(),
            });
        }

        records.insert(record.jti, record.clone());
        Ok(record)
    }

    async fn find_by_jti(&self, jti: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&jti).cloned())
    }

    async fn revoke(&self, jti: Uuid) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(&jti) {
            Some(record) if !record.is_revoked => {
                record.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let mut count = 0;

        for record in records.values_mut() {
            if record.user_id == user_id && !record.is_revoked {
                record.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| !record.is_expired());

        Ok(initial_count - records.len())
    }
}
