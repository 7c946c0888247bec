//! MySQL implementation of UserStore.
//!
//! Expects a `users` table with columns `id`, `name`, `email`, `age` (nullable) and
//! `created_at`.

use crate::config::DatabaseConfig;
use crate::domain::User;
use crate::storage::{StorageError, UserStore};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow};
use sqlx::{Connection, MySql, Pool, Row};
use tracing::{debug, info};

const DEFAULT_CHARSET: &str = "utf8mb4";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// MySqlStorage implements UserStore on a sqlx MySQL pool.
pub struct MySqlStorage {
    pool: Pool<MySql>,
}

impl MySqlStorage {
    /// Opens a pool sized from the database config and verifies it with a ping.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let charset = if config.charset.is_empty() {
            DEFAULT_CHARSET
        } else {
            &config.charset
        };

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)
            .charset(charset);

        let pool = pool_options(config).connect_with(options).await?;
        let storage = Self { pool };
        storage.ping().await?;

        info!(
            user = %config.user,
            host = %config.host,
            port = config.port,
            database = %config.name,
            "Successfully connected to database"
        );
        Ok(storage)
    }
}

/// Maps the configured pool sizing onto sqlx pool options.
///
/// sqlx has no idle-connection cap, so `max_idle_connections` becomes the number of
/// connections kept open, bounded by the pool size.
fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    let max_connections = if config.max_open_connections == 0 {
        DEFAULT_MAX_CONNECTIONS
    } else {
        config.max_open_connections
    };

    let mut options = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(config.max_idle_connections.min(max_connections));

    if !config.connection_max_lifetime.is_zero() {
        options = options.max_lifetime(config.connection_max_lifetime);
    }

    options
}

#[async_trait]
impl UserStore for MySqlStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, age, created_at
            FROM users ORDER BY id LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), limit, "Fetched users");
        rows.iter().map(parse_user_row).collect()
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.pool.close().await;
        Ok(())
    }
}

/// Parses a user from a database row.
fn parse_user_row(row: &MySqlRow) -> Result<User, StorageError> {
    let age: Option<i32> = row.try_get("age")?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        age: age.unwrap_or_default(),
        created_at: row.try_get("created_at")?,
    })
}
