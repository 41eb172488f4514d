//! MySQL implementation of the UserRepository trait.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::user::{User, UserRole};
use sl_core::errors::{AuthError, DomainError};
use sl_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("id", e))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| db_error("role", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| db_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| db_error("password_hash", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| db_error("first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| db_error("last_name", e))?,
            role: UserRole::from_str(&role).map_err(|_| DomainError::Database {
                message: format!("Unknown role in user row: {}", role),
            })?,
            country: row.try_get("country").map_err(|e| db_error("country", e))?,
            city: row.try_get("city").map_err(|e| db_error("city", e))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| db_error("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_error("updated_at", e))?,
        })
    }
}

fn db_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, \
                            country, city, is_active, created_at, updated_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name, role,
                country, city, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role.as_str())
            .bind(&user.country)
            .bind(&user.city)
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                // the unique index on email is the authoritative duplicate check
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::EmailAlreadyRegistered)
                }
                _ => DomainError::Database {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = "UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?";

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update password hash: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
