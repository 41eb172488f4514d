//! MySQL connection pool construction

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use sl_shared::config::DatabaseConfig;

/// Create a connection pool from configuration
///
/// All registry and user-store calls inherit this pool's acquire timeout.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        "connecting to database"
    );

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .connect(&config.url)
        .await
}
