//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading error.
///
/// Both variants are fatal: callers abort startup rather than run on a partial configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
