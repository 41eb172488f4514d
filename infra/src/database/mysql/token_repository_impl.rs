//! MySQL implementation of the TokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::token::RefreshTokenRecord;
use sl_core::errors::DomainError;
use sl_core::repositories::TokenRepository;

/// MySQL implementation of the refresh-token registry
///
/// Revocation is a conditional update on `is_revoked = FALSE`; the reported
/// row count is what makes rotation a compare-and-set.
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a RefreshTokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let jti: String = row.try_get("jti").map_err(|e| db_error("jti", e))?;
        let user_id: String = row.try_get("user_id").map_err(|e| db_error("user_id", e))?;

        Ok(RefreshTokenRecord {
            jti: Uuid::parse_str(&jti).map_err(|e| DomainError::Database {
                message: format!("Invalid jti UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Database {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| db_error("token_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| db_error("expires_at", e))?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| db_error("is_revoked", e))?,
        })
    }
}

fn db_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                jti, user_id, token_hash, created_at, expires_at, is_revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.jti.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token_hash)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.is_revoked)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to save refresh token: {}", e),
            })?;

        Ok(record)
    }

    async fn find_by_jti(&self, jti: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT jti, user_id, token_hash, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE jti = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(jti.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find refresh token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke(&self, jti: Uuid) -> Result<bool, DomainError> {
        let query = "UPDATE refresh_tokens SET is_revoked = TRUE WHERE jti = ? AND is_revoked = FALSE";

        let result = sqlx::query(query)
            .bind(jti.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to revoke refresh token: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query =
            "UPDATE refresh_tokens SET is_revoked = TRUE WHERE user_id = ? AND is_revoked = FALSE";

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to revoke user tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete expired tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
