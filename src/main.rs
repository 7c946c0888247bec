mod app;
mod config;
mod domain;
mod server;
mod storage;

use app::App;
use config::{Config, ConfigLoader, DEFAULT_CONFIG_DIR, EnvSource, LoggingConfig, ProcessEnv};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const CONFIG_DIR_VAR: &str = "CONFIG_DIR";

fn parse_config_dir() -> String {
    for arg in env::args().skip(1) {
        if let Some(dir) = arg.strip_prefix("--config-dir=") {
            return dir.to_string();
        }
    }
    ProcessEnv
        .var(CONFIG_DIR_VAR)
        .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string())
}

fn init_tracing(logging: &LoggingConfig) {
    let level = match logging.level.as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Logs the resolved configuration, with the database password redacted.
fn print_config(config: &Config) {
    let password = if config.database.password.is_empty() {
        ""
    } else {
        "********"
    };

    info!(environment = %config.environment, "Environment");
    info!(
        host = %config.database.host,
        port = config.database.port,
        user = %config.database.user,
        password,
        name = %config.database.name,
        charset = %config.database.charset,
        max_open = config.database.max_open_connections,
        max_idle = config.database.max_idle_connections,
        max_lifetime = ?config.database.connection_max_lifetime,
        "Database"
    );
    info!(
        host = %config.server.host,
        port = config.server.port,
        mode = %config.server.mode,
        read_timeout = ?config.server.read_timeout,
        write_timeout = ?config.server.write_timeout,
        idle_timeout = ?config.server.idle_timeout,
        "Server"
    );
    info!(level = %config.logging.level, format = %config.logging.format, "Logging");
    info!(
        endpoint = %config.graphql.endpoint,
        playground = %config.graphql.playground,
        playground_enabled = config.graphql.playground_enabled,
        "GraphQL"
    );
    info!(
        enable_graphql = config.features.enable_graphql,
        enable_rest = config.features.enable_rest,
        "Features"
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config_dir = parse_config_dir();
    let config = match ConfigLoader::new(&config_dir).load(&ProcessEnv) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);
    info!(config_dir = %config_dir, environment = %config.environment, "Configuration loaded");

    if env::args().any(|arg| arg == "--print-config") {
        print_config(&config);
        return ExitCode::SUCCESS;
    }

    let app = match App::new(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to start");
            return ExitCode::FAILURE;
        }
    };

    let result = app.run().await;

    if let Err(e) = app.stop().await {
        error!(error = %e, "Failed to close storage");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
