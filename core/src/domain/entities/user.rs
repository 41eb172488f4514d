//! User entity representing a registered account in the ScoutLine system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

/// Role attached to every account
///
/// The set of roles is closed; unknown role strings are rejected at the
/// transport boundary instead of being coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A player maintaining a profile for recruitment
    Player,
    /// A scout browsing and shortlisting players
    Scout,
    /// A platform administrator
    Admin,
}

impl UserRole {
    /// String form used in JWT claims and database rows
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Player => "player",
            UserRole::Scout => "scout",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(UserRole::Player),
            "scout" => Ok(UserRole::Scout),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::InvalidRole {
                role: other.to_string(),
            }),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email, unique across the platform
    pub email: String,

    /// Salted password hash; never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Account role
    pub role: UserRole,

    /// Country of residence
    pub country: Option<String>,

    /// City of residence
    pub city: Option<String>,

    /// Whether the account may authenticate
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        role: UserRole,
        country: Option<String>,
        city: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            last_name,
            role,
            country,
            city,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
