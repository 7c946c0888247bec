//! Request handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use super::AppState;

const DEFAULT_USER_LIMIT: u32 = 100;
const MAX_USER_LIMIT: u32 = 1000;

pub async fn root() -> &'static str {
    "Hello, GraphQL Lab!"
}

/// Reports healthy only when the database answers a ping.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => Json(json!({"status": "healthy", "database": "connected"})).into_response(),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "unhealthy", "error": e.to_string()})),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    limit: Option<u32>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Response {
    let limit = query
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_USER_LIMIT)
        .min(MAX_USER_LIMIT);

    match state.store.list_users(limit).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Placeholder page; no GraphQL engine sits behind the endpoint yet.
pub async fn playground(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>GraphQL Playground</title></head>
<body>
<h1>GraphQL Playground</h1>
<p>Queries will be served at <code>{}</code>.</p>
</body>
</html>
"#,
        state.graphql.endpoint
    ))
}
