//! Configuration loading for the service.
//!
//! Uses serde_yaml to load a base `config.yaml`, merges an environment-specific file on top
//! of it (selected by `APP_ENV`), and finally applies environment-variable overrides.

mod database;
mod duration;
mod env;
mod error;
mod features;
mod graphql;
mod loader;
mod logging;
mod merge;
mod server;

pub use database::DatabaseConfig;
pub use env::{EnvSource, ProcessEnv};
pub use error::ConfigError;
pub use features::FeaturesConfig;
pub use graphql::GraphqlConfig;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_DIR};
pub use logging::LoggingConfig;
pub use server::ServerConfig;

use merge::{Merge, overlay};
use serde::Deserialize;

/// Root configuration structure.
///
/// Every section is optional in the files; missing sections and fields take their zero value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deployment environment: "development", "sit", "uat" or "production".
    pub environment: String,
    /// Database connection and pool settings.
    pub database: DatabaseConfig,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Log verbosity and format.
    pub logging: LoggingConfig,
    /// GraphQL endpoint and playground paths.
    pub graphql: GraphqlConfig,
    /// Feature toggles.
    pub features: FeaturesConfig,
}

impl Merge for Config {
    fn merge(&mut self, other: Self) {
        overlay(&mut self.environment, other.environment);
        self.database.merge(other.database);
        self.server.merge(other.server);
        self.logging.merge(other.logging);
        self.graphql.merge(other.graphql);
        self.features.merge(other.features);
    }
}
