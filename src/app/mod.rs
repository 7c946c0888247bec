//! Service startup and shutdown.
//!
//! Connects the database, runs a startup self-check, and serves HTTP until Ctrl+C.

mod error;

pub use error::AppError;

use std::sync::Arc;
use std::time::Instant;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::server;
use crate::storage::{MySqlStorage, UserStore};

/// The running service.
pub struct App {
    cfg: Config,
    store: Arc<dyn UserStore>,
    started_at: Instant,
}

impl App {
    /// Creates the app and connects to the database.
    pub async fn new(cfg: Config) -> Result<Self, AppError> {
        let store = MySqlStorage::connect(&cfg.database).await?;
        Ok(Self {
            cfg,
            store: Arc::new(store),
            started_at: Instant::now(),
        })
    }

    /// Serves HTTP until a shutdown signal arrives.
    pub async fn run(&self) -> Result<(), AppError> {
        self.check_storage().await;

        let addr = server::listen_addr(&self.cfg.server);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| AppError::Bind { addr, source })?;

        info!(
            environment = %self.cfg.environment,
            mode = %self.cfg.server.mode,
            rest = self.cfg.features.enable_rest,
            graphql = self.cfg.features.enable_graphql,
            "Starting server"
        );

        let router = server::build_router(&self.cfg, Arc::clone(&self.store));
        server::serve(listener, router, shutdown_signal())
            .await
            .map_err(AppError::Serve)
    }

    /// Closes the database pool.
    pub async fn stop(&self) -> Result<(), AppError> {
        self.store.close().await?;
        info!(uptime = ?self.started_at.elapsed(), "Service stopped");
        Ok(())
    }

    /// Logs how many users the database holds. Failure is reported, not fatal.
    async fn check_storage(&self) {
        match self.store.count_users().await {
            Ok(count) => info!(users = count, "Database test successful"),
            Err(e) => warn!(error = %e, "Database test failed"),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
