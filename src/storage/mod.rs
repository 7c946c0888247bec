//! Storage interfaces and implementations for user data.

mod mysql;

pub use mysql::MySqlStorage;

use crate::domain::User;
use async_trait::async_trait;

/// UserStore defines the read interface the HTTP layer needs.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Ping verifies the database is reachable.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Count returns the total number of users.
    async fn count_users(&self) -> Result<i64, StorageError>;

    /// ListUsers returns up to `limit` users ordered by id.
    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError>;

    /// Close closes the storage connection.
    async fn close(&self) -> Result<(), StorageError>;
}

/// StorageError represents errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
