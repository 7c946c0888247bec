//! HTTP surface of the service.
//!
//! Serves a health check backed by the database, the REST users listing, and a placeholder
//! page at the configured GraphQL playground path. There is no query execution behind it.

mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{Config, GraphqlConfig, ServerConfig};
use crate::storage::UserStore;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ENDPOINT: &str = "/graphql";
const DEFAULT_PLAYGROUND: &str = "/playground";

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn UserStore>,
    graphql: Arc<GraphqlConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, graphql: GraphqlConfig) -> Self {
        Self {
            store,
            graphql: Arc::new(graphql),
        }
    }
}

/// Address the listener binds to, with zero values replaced by defaults.
pub fn listen_addr(config: &ServerConfig) -> String {
    let host = if config.host.is_empty() {
        DEFAULT_HOST
    } else {
        &config.host
    };
    let port = if config.port == 0 {
        DEFAULT_PORT
    } else {
        config.port
    };
    format!("{}:{}", host, port)
}

/// Route paths must start with a slash; an empty path takes the default.
fn route_path(path: &str, default: &str) -> String {
    match path {
        "" => default.to_string(),
        p if p.starts_with('/') => p.to_string(),
        p => format!("/{}", p),
    }
}

/// Why the playground path cannot be registered, if it cannot.
///
/// The page takes no parameters, so capture syntax is refused along with fixed routes.
fn playground_conflict(path: &str, registered: &[&str]) -> Option<&'static str> {
    if registered.contains(&path) {
        Some("path is already served")
    } else if path.contains(['{', '}'])
        || path.split('/').any(|seg| seg.starts_with([':', '*']))
    {
        Some("path parameters are not allowed")
    } else {
        None
    }
}

/// Build the router for the resolved configuration.
#[allow(deprecated)]
pub fn build_router(config: &Config, store: Arc<dyn UserStore>) -> Router {
    let mut graphql = config.graphql.clone();
    graphql.endpoint = route_path(&graphql.endpoint, DEFAULT_ENDPOINT);
    graphql.playground = route_path(&graphql.playground, DEFAULT_PLAYGROUND);

    let mut registered = vec!["/", "/health"];
    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    if config.features.enable_rest {
        registered.push("/users");
        router = router.route("/users", get(handlers::list_users));
    }

    if graphql.playground_enabled {
        match playground_conflict(&graphql.playground, &registered) {
            Some(reason) => warn!(
                path = %graphql.playground,
                reason,
                "Skipping GraphQL playground route"
            ),
            None => {
                info!(path = %graphql.playground, "GraphQL playground enabled");
                router = router.route(&graphql.playground, get(handlers::playground));
            }
        }
    }

    let mut router = router
        .with_state(AppState::new(store, graphql))
        .layer(TraceLayer::new_for_http());

    if !config.server.write_timeout.is_zero() {
        router = router.layer(TimeoutLayer::new(config.server.write_timeout));
    }

    router
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(address = %addr, "HTTP server starting");
    info!("Health check available at http://{}/health", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests;
