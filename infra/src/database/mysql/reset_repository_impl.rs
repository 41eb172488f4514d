//! MySQL implementation of the ResetTokenRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::reset::PasswordResetToken;
use sl_core::errors::DomainError;
use sl_core::repositories::ResetTokenRepository;

/// MySQL implementation of the reset-token registry
///
/// Consumption runs as a conditional update on `used = FALSE`; of two
/// concurrent consumes of the same token only one sees an affected row.
pub struct MySqlResetTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlResetTokenRepository {
    /// Create a new MySQL reset-token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResetTokenRepository for MySqlResetTokenRepository {
    async fn save(&self, token: PasswordResetToken) -> Result<PasswordResetToken, DomainError> {
        let query = r#"
            INSERT INTO password_reset_tokens (
                token_hash, user_id, expires_at, used, created_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&token.token_hash)
            .bind(token.user_id.to_string())
            .bind(token.expires_at)
            .bind(token.used)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to save reset token: {}", e),
            })?;

        Ok(token)
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<Uuid>, DomainError> {
        // claim the token first; the flip and the validity checks are one statement
        let claim =
            "UPDATE password_reset_tokens SET used = TRUE \
             WHERE token_hash = ? AND used = FALSE AND expires_at > ?";

        let result = sqlx::query(claim)
            .bind(token_hash)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to consume reset token: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query("SELECT user_id FROM password_reset_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to load consumed reset token: {}", e),
            })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Database {
            message: format!("Failed to get user_id: {}", e),
        })?;

        Uuid::parse_str(&user_id)
            .map(Some)
            .map_err(|e| DomainError::Database {
                message: format!("Invalid user UUID: {}", e),
            })
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let query = "DELETE FROM password_reset_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete expired reset tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
