//! Environment-variable layer, the highest-priority configuration source.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use tracing::{debug, warn};

use super::Config;

/// Key-value lookup the loader reads environment overrides from.
///
/// Empty values are treated the same as missing ones.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }
}

pub const APP_ENV: &str = "APP_ENV";
pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";
pub const SERVER_PORT: &str = "SERVER_PORT";
pub const SERVER_HOST: &str = "SERVER_HOST";
pub const SERVER_MODE: &str = "SERVER_MODE";
pub const LOG_LEVEL: &str = "LOG_LEVEL";

fn set_string(field: &mut String, env: &impl EnvSource, key: &str) {
    if let Some(value) = env.var(key) {
        debug!(var = key, "Applying environment override");
        *field = value;
    }
}

/// Malformed values leave the field untouched; they never fail the load.
fn set_parsed<T: FromStr>(field: &mut T, env: &impl EnvSource, key: &str) {
    let Some(raw) = env.var(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => {
            debug!(var = key, "Applying environment override");
            *field = value;
        }
        Err(_) => warn!(var = key, value = %raw, "Ignoring malformed environment override"),
    }
}

impl Config {
    /// Apply environment-variable overrides on top of the merged file layers.
    pub(crate) fn apply_env_overrides(&mut self, env: &impl EnvSource) {
        set_string(&mut self.database.host, env, DB_HOST);
        set_parsed(&mut self.database.port, env, DB_PORT);
        set_string(&mut self.database.user, env, DB_USER);
        set_string(&mut self.database.password, env, DB_PASSWORD);
        set_string(&mut self.database.name, env, DB_NAME);

        set_parsed(&mut self.server.port, env, SERVER_PORT);
        set_string(&mut self.server.host, env, SERVER_HOST);
        set_string(&mut self.server.mode, env, SERVER_MODE);

        set_string(&mut self.logging.level, env, LOG_LEVEL);
    }
}
