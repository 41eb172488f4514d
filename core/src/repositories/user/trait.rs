//! User repository trait defining the interface to the external user store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for the user credential store
///
/// The auth core only reads user records and asks the store to update the
/// password hash; all other profile concerns belong to the surrounding
/// system.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user
    /// * `Err(DomainError::Auth(EmailAlreadyRegistered))` - Email is taken
    /// * `Err(DomainError)` - Store error
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by login email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Replace a user's password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Hash updated
    /// * `Ok(false)` - No user with that id
    /// * `Err(DomainError)` - Store error
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Check whether an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
