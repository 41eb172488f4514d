//! Main authentication service implementation

use std::sync::Arc;

use chrono::Duration;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::reset::PasswordResetToken;
use crate::domain::entities::token::{TokenPair, TokenType};
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{ResetTokenRepository, TokenRepository, UserRepository};
use crate::services::password::{hash_password, verify_password};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Length of the opaque password reset token
const RESET_TOKEN_LENGTH: usize = 32;

/// Registration input, already syntactically validated at the boundary
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Authentication service sequencing the full session lifecycle
pub struct AuthService<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: ResetTokenRepository,
{
    /// User repository for the external credential store
    user_repository: Arc<U>,
    /// Token service for JWT issuance and the refresh registry
    token_service: Arc<TokenService<T>>,
    /// Registry of single-use reset tokens
    reset_repository: Arc<P>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T, P> AuthService<U, T, P>
where
    U: UserRepository,
    T: TokenRepository,
    P: ResetTokenRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        reset_repository: Arc<P>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            reset_repository,
            config,
        }
    }

    /// Register a new account and open its first session
    ///
    /// Fails with `EmailAlreadyRegistered` when the email is taken.
    pub async fn register(&self, input: NewUser) -> DomainResult<(User, TokenPair)> {
        if self.user_repository.exists_by_email(&input.email).await? {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            input.email,
            password_hash,
            input.first_name,
            input.last_name,
            input.role,
            input.country,
            input.city,
        );
        let user = self.user_repository.create(user).await?;

        let tokens = self.token_service.issue_token_pair(&user).await?;
        Ok((user, tokens))
    }

    /// Open a session for an existing account
    ///
    /// Unknown email, deactivated account and wrong password are
    /// indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("login rejected: unknown email");
                return Err(DomainError::Auth(AuthError::AuthenticationFailed));
            }
        };

        if !user.is_active {
            debug!(user_id = %user.id, "login rejected: account inactive");
            return Err(DomainError::Auth(AuthError::AuthenticationFailed));
        }

        if !verify_password(password, &user.password_hash) {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(DomainError::Auth(AuthError::AuthenticationFailed));
        }

        let tokens = self.token_service.issue_token_pair(&user).await?;
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a new pair, rotating the lease
    ///
    /// The presented token must verify cryptographically, be of refresh
    /// type, belong to a live account, and be backed by a live registry
    /// lease. Rotation claims the old lease before the new pair is issued,
    /// so of two concurrent refreshes with one token exactly one succeeds.
    /// Every failure collapses to `InvalidRefreshToken`.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<(User, TokenPair)> {
        let claims = self
            .token_service
            .verify_token(refresh_token)
            .map_err(|e| self.reject_refresh("verification failed", e))?;

        if claims.token_type != TokenType::Refresh {
            debug!("refresh rejected: wrong token type");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }
        let jti = claims.rotation_id().ok_or_else(|| {
            debug!("refresh rejected: missing rotation id");
            DomainError::Token(TokenError::InvalidRefreshToken)
        })?;

        let user = self
            .resolve_active_user(&claims.sub)
            .await?
            .ok_or_else(|| {
                debug!("refresh rejected: subject unknown or inactive");
                DomainError::Token(TokenError::InvalidRefreshToken)
            })?;

        let valid = self
            .token_service
            .validate_refresh(&claims, refresh_token)
            .await?;
        if !valid {
            debug!(%jti, "refresh rejected: lease check failed");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        // Claim the old lease first; losing the flip means a concurrent
        // refresh already rotated this token.
        if !self.token_service.revoke_refresh_token(jti).await? {
            debug!(%jti, "refresh rejected: lease already rotated");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        let tokens = self.token_service.issue_token_pair(&user).await?;
        Ok((user, tokens))
    }

    /// Tear down a session
    ///
    /// Expiration is ignored when decoding so stale sessions can still be
    /// revoked; an absent or undecodable token means nothing to revoke and
    /// is not an error.
    pub async fn logout(&self, refresh_token: Option<&str>) -> DomainResult<()> {
        let token = match refresh_token {
            Some(token) => token,
            None => return Ok(()),
        };

        let claims = match self.token_service.decode_ignoring_expiry(token) {
            Ok(claims) => claims,
            Err(_) => {
                debug!("logout with undecodable token, nothing to revoke");
                return Ok(());
            }
        };

        if let Some(jti) = claims.rotation_id() {
            self.token_service.revoke_refresh_token(jti).await?;
        }

        Ok(())
    }

    /// Start the password reset flow
    ///
    /// Returns the opaque token for delivery when the email is known, `None`
    /// otherwise; the caller must respond identically in both cases.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<Option<String>> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("reset requested for unknown email");
                return Ok(None);
            }
        };

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RESET_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let record = PasswordResetToken::new(
            user.id,
            TokenService::<T>::hash_token(&token),
            Duration::seconds(self.config.reset_token_expiry),
        );
        self.reset_repository.save(record).await?;

        debug!(user_id = %user.id, "reset token issued");
        Ok(Some(token))
    }

    /// Complete the password reset flow
    ///
    /// Consumes the token (single use, time boxed), updates the hash, and
    /// revokes the user's outstanding sessions.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user_id = self
            .reset_repository
            .consume(&TokenService::<T>::hash_token(token))
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidResetToken))?;

        self.update_password(user_id, new_password).await
    }

    /// Change a password by proving knowledge of the old one
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::AuthenticationFailed))?;

        if !verify_password(old_password, &user.password_hash) {
            debug!(user_id = %user.id, "password change rejected: old password mismatch");
            return Err(DomainError::Auth(AuthError::AuthenticationFailed));
        }

        self.update_password(user.id, new_password).await
    }

    /// Store a new hash and revoke outstanding sessions
    ///
    /// A credential rotation invalidates every refresh lease the user holds.
    async fn update_password(&self, user_id: Uuid, new_password: &str) -> DomainResult<()> {
        let password_hash = hash_password(new_password)?;
        let updated = self
            .user_repository
            .update_password_hash(user_id, &password_hash)
            .await?;
        if !updated {
            return Err(DomainError::NotFound {
                resource: "user".to_string(),
            });
        }

        let revoked = self.token_service.revoke_all_for_user(user_id).await?;
        debug!(%user_id, revoked, "password updated, sessions revoked");
        Ok(())
    }

    async fn resolve_active_user(&self, sub: &str) -> DomainResult<Option<User>> {
        let user_id = match Uuid::parse_str(sub) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        Ok(self
            .user_repository
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active))
    }

    fn reject_refresh(&self, reason: &str, source: DomainError) -> DomainError {
        debug!(%source, "refresh rejected: {reason}");
        DomainError::Token(TokenError::InvalidRefreshToken)
    }
}
