//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserRole};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (30 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// JWT issuer
pub const JWT_ISSUER: &str = "scoutline";

/// JWT audience
pub const JWT_AUDIENCE: &str = "scoutline-api";

/// Discriminates access tokens from refresh tokens
///
/// The two are not interchangeable: the access guard rejects refresh tokens
/// and the refresh flow rejects access tokens, regardless of signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl Default for TokenType {
    // A token without a type tag is treated as an access token
    fn default() -> Self {
        TokenType::Access
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Login email of the subject
    pub email: String,

    /// Role of the subject
    pub role: UserRole,

    /// Token type tag
    #[serde(rename = "type", default)]
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Rotation handle, present on refresh tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access(user: &User, ttl: Duration, issuer: &str, audience: &str) -> Self {
        let now = Utc::now();

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            token_type: TokenType::Access,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: None,
        }
    }

    /// Creates new claims for a refresh token carrying a fresh rotation id
    pub fn new_refresh(
        user: &User,
        jti: Uuid,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            token_type: TokenType::Refresh,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Some(jti.to_string()),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the rotation id from the claims, if present
    pub fn rotation_id(&self) -> Option<Uuid> {
        self.jti.as_deref().and_then(|j| Uuid::parse_str(j).ok())
    }
}

/// Refresh token record persisted in the registry
///
/// One record is one session lease. It is inserted on issuance, its revoked
/// flag flips once on rotation or logout, and it is never otherwise mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Rotation id, matching the `jti` claim of the signed token
    pub jti: Uuid,

    /// User this lease belongs to
    pub user_id: Uuid,

    /// SHA-256 hash of the signed token string
    pub token_hash: String,

    /// Timestamp when the lease was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the lease expires
    pub expires_at: DateTime<Utc>,

    /// Whether the lease has been revoked
    pub is_revoked: bool,
}

impl RefreshTokenRecord {
    /// Creates a new lease
    pub fn new(jti: Uuid, user_id: Uuid, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            jti,
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + ttl,
            is_revoked: false,
        }
    }

    /// Checks if the lease has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the lease may still authorize a refresh
    pub fn is_active(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Revokes the lease
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}
