//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshTokenRecord, TokenPair, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for minting and verifying JWTs and managing refresh leases
///
/// Verification is pure computation over the signature, expiry and
/// issuer/audience claims; only issuance and revocation touch the registry.
pub struct TokenService<R: TokenRepository> {
    repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues an access/refresh pair for a user and persists the refresh lease
    ///
    /// The refresh token carries a fresh `jti`; its SHA-256 hash is stored so
    /// that a stolen `jti` with a different payload fails the registry check.
    pub async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, DomainError> {
        let access_claims = Claims::new_access(
            user,
            Duration::seconds(self.config.access_token_expiry),
            &self.config.issuer,
            &self.config.audience,
        );
        let access_token = self.encode_jwt(&access_claims)?;

        let jti = Uuid::new_v4();
        let refresh_claims = Claims::new_refresh(
            user,
            jti,
            Duration::seconds(self.config.refresh_token_expiry),
            &self.config.issuer,
            &self.config.audience,
        );
        let refresh_token = self.encode_jwt(&refresh_claims)?;

        let record = RefreshTokenRecord::new(
            jti,
            user.id,
            Self::hash_token(&refresh_token),
            Duration::seconds(self.config.refresh_token_expiry),
        );
        self.repository
            .save(record)
            .await
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
        ))
    }

    /// Verifies a token's signature, expiry, issuer and audience
    ///
    /// Pure and stateless; callers check the type tag for their flow.
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else {
                    DomainError::Token(TokenError::InvalidTokenFormat)
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decodes a token checking the signature but not the expiry
    ///
    /// Logout uses this so an expired session can still be torn down.
    pub fn decode_ignoring_expiry(&self, token: &str) -> Result<Claims, DomainError> {
        let mut validation = self.validation.clone();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;

        Ok(token_data.claims)
    }

    /// Checks a presented refresh token against its registry lease
    ///
    /// The signed payload alone is never sufficient: the lease must exist,
    /// be unrevoked and unexpired, belong to the claims' subject, and store
    /// the hash of exactly this token string.
    pub async fn validate_refresh(
        &self,
        claims: &Claims,
        raw_token: &str,
    ) -> Result<bool, DomainError> {
        if claims.token_type != TokenType::Refresh {
            return Ok(false);
        }
        let (jti, user_id) = match (claims.rotation_id(), claims.user_id().ok()) {
            (Some(jti), Some(user_id)) => (jti, user_id),
            _ => return Ok(false),
        };

        self.repository
            .validate(jti, &Self::hash_token(raw_token), user_id)
            .await
    }

    /// Revokes a refresh lease
    ///
    /// Returns whether this call performed the flip; rotation uses that as
    /// its claim so concurrent refreshes of one token have a single winner.
    pub async fn revoke_refresh_token(&self, jti: Uuid) -> Result<bool, DomainError> {
        self.repository.revoke(jti).await
    }

    /// Revokes every refresh lease belonging to a user
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.repository.revoke_all_for_user(user_id).await
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Hashes a token string for registry storage
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
