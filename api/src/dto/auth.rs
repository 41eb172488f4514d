//! Authentication DTOs
//!
//! Wire names are camelCase; structural validation happens here, before any
//! request reaches the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sl_core::domain::entities::user::{User, UserRole};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Role name; checked against the closed role set in the handler
    pub role: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub country: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Optional in the body; the refresh cookie is the fallback
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetConfirmRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// Sanitized user representation; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub country: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            country: user.country.clone(),
            city: user.city.clone(),
            created_at: user.created_at,
        }
    }
}

/// Token pair plus the sanitized subject, returned by register/login/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_wire_names() {
        let json = r#"{
            "email": "alice@example.com",
            "password": "password123",
            "role": "player",
            "firstName": "Alice",
            "lastName": "Doe",
            "country": "England"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.first_name, "Alice");
        assert_eq!(request.last_name, "Doe");
        assert!(request.city.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let json = r#"{
            "email": "alice@example.com",
            "password": "short",
            "role": "player",
            "firstName": "Alice",
            "lastName": "Doe"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_view_omits_password_hash() {
        let user = User::new(
            "alice@example.com".to_string(),
            "$2b$10$secret".to_string(),
            "Alice".to_string(),
            "Doe".to_string(),
            UserRole::Scout,
            None,
            None,
        );

        let json = serde_json::to_string(&UserView::from(&user)).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"firstName\":\"Alice\""));
        assert!(json.contains("\"role\":\"scout\""));
    }
}
