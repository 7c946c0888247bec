//! Layered loading: base file, environment-specific file, then environment variables.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::env::{APP_ENV, EnvSource};
use super::merge::Merge;
use super::{Config, ConfigError};

/// Directory the configuration files live in unless told otherwise.
pub const DEFAULT_CONFIG_DIR: &str = "configs";
/// Always-loaded base file.
pub const BASE_CONFIG_FILE: &str = "config.yaml";
/// Environment used when `APP_ENV` is unset or empty.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Maps an environment tag to the file holding its overrides.
///
/// Unknown tags fall back to the base file, which means no override file is read.
pub fn config_file_for(env: &str) -> &'static str {
    match env {
        "development" => BASE_CONFIG_FILE,
        "sit" => "config.sit.yaml",
        "uat" => "config.uat.yaml",
        "production" => "config.prod.yaml",
        _ => BASE_CONFIG_FILE,
    }
}

/// Loads a [`Config`] from a directory of YAML files.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the configuration.
    ///
    /// `APP_ENV` alone selects the override file. The files' own `environment` fields merge
    /// like any other string and fall back to the `APP_ENV` tag when neither file sets one.
    pub fn load(&self, env: &impl EnvSource) -> Result<Config, ConfigError> {
        let app_env = env
            .var(APP_ENV)
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let mut config = self.load_file(BASE_CONFIG_FILE)?;

        let env_file = config_file_for(&app_env);
        if app_env != DEFAULT_ENVIRONMENT && env_file != BASE_CONFIG_FILE {
            let overrides = self.load_file(env_file)?;
            config.merge(overrides);
        }

        if config.environment.is_empty() {
            config.environment = app_env.clone();
        }

        config.apply_env_overrides(env);

        debug!(
            app_env = %app_env,
            environment = %config.environment,
            dir = %self.dir.display(),
            "Configuration layers resolved"
        );

        Ok(config)
    }

    fn load_file(&self, name: &str) -> Result<Config, ConfigError> {
        let path = self.dir.join(name);
        debug!(path = %path.display(), "Reading config file");

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }
}
