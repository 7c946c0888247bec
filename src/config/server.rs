//! HTTP server configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;
use super::merge::{Merge, overlay};

/// Listener settings for the HTTP server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Listen address.
    pub host: String,
    /// Run mode: "debug", "release" or "test".
    pub mode: String,
    /// Request read timeout. Loaded and logged, not enforced by `axum::serve`.
    #[serde(with = "duration")]
    pub read_timeout: Duration,
    /// Upper bound on handling a single request.
    #[serde(with = "duration")]
    pub write_timeout: Duration,
    /// Keep-alive idle timeout. Loaded and logged, not enforced by `axum::serve`.
    #[serde(with = "duration")]
    pub idle_timeout: Duration,
}

impl Merge for ServerConfig {
    fn merge(&mut self, other: Self) {
        overlay(&mut self.port, other.port);
        overlay(&mut self.host, other.host);
        overlay(&mut self.mode, other.mode);
        overlay(&mut self.read_timeout, other.read_timeout);
        overlay(&mut self.write_timeout, other.write_timeout);
        overlay(&mut self.idle_timeout, other.idle_timeout);
    }
}
