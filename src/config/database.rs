//! Database configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;
use super::merge::{Merge, overlay};

/// MySQL connection and pool settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database server hostname.
    pub host: String,
    /// Database server port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password. Prefer `DB_PASSWORD` over committing it to a file.
    pub password: String,
    /// Schema name.
    pub name: String,
    /// Connection character set, e.g. "utf8mb4".
    pub charset: String,
    /// Upper bound on pooled connections.
    pub max_open_connections: u32,
    /// Connections kept warm in the pool.
    pub max_idle_connections: u32,
    /// Maximum age of a pooled connection before it is recycled.
    #[serde(with = "duration")]
    pub connection_max_lifetime: Duration,
}

impl Merge for DatabaseConfig {
    fn merge(&mut self, other: Self) {
        overlay(&mut self.host, other.host);
        overlay(&mut self.port, other.port);
        overlay(&mut self.user, other.user);
        overlay(&mut self.password, other.password);
        overlay(&mut self.name, other.name);
        overlay(&mut self.charset, other.charset);
        overlay(&mut self.max_open_connections, other.max_open_connections);
        overlay(&mut self.max_idle_connections, other.max_idle_connections);
        overlay(&mut self.connection_max_lifetime, other.connection_max_lifetime);
    }
}
