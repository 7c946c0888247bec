//! Logging configuration.

use serde::Deserialize;

use super::merge::{Merge, overlay};

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging verbosity: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "json" or "text".
    pub format: String,
}

impl Merge for LoggingConfig {
    fn merge(&mut self, other: Self) {
        overlay(&mut self.level, other.level);
        overlay(&mut self.format, other.format);
    }
}
