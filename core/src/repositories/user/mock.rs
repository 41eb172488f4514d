//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// Mock user repository backed by a map keyed on user id
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        if let Some(user) = users.get_mut(&id) {
            user.set_password_hash(password_hash.to_string());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
