//! Tests for the HTTP router.

use super::*;
use crate::domain::User;
use crate::storage::StorageError;
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::sync::Mutex;
use tower::ServiceExt;

/// In-memory store that records the limits it was asked for.
#[derive(Default)]
struct MemoryStore {
    users: Vec<User>,
    down: bool,
    limits: Mutex<Vec<u32>>,
}

impl MemoryStore {
    fn with_users(count: i64) -> Self {
        let users = (1..=count)
            .map(|id| User {
                id,
                name: format!("user{}", id),
                email: format!("user{}@example.com", id),
                age: 30,
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            })
            .collect();
        Self {
            users,
            ..Default::default()
        }
    }

    fn down() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn ping(&self) -> Result<(), StorageError> {
        if self.down {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, StorageError> {
        self.ping().await?;
        Ok(self.users.len() as i64)
    }

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError> {
        self.ping().await?;
        self.limits.lock().unwrap().push(limit);
        Ok(self.users.iter().take(limit as usize).cloned().collect())
    }

    async fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.features.enable_rest = true;
    config.graphql.endpoint = "/graphql".to_string();
    config.graphql.playground = "/playground".to_string();
    config.graphql.playground_enabled = true;
    config
}

async fn send_get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_root() {
    let router = build_router(&test_config(), Arc::new(MemoryStore::default()));
    let (status, body) = send_get(router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, GraphQL Lab!");
}

#[tokio::test]
async fn test_health_connected() {
    let router = build_router(&test_config(), Arc::new(MemoryStore::default()));
    let (status, body) = send_get(router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_health_database_down() {
    let router = build_router(&test_config(), Arc::new(MemoryStore::down()));
    let (status, body) = send_get(router, "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "unhealthy");
    assert!(json["error"].as_str().unwrap().contains("Database error"));
}

#[tokio::test]
async fn test_list_users() {
    let router = build_router(&test_config(), Arc::new(MemoryStore::with_users(3)));
    let (status, body) = send_get(router, "/users").await;

    assert_eq!(status, StatusCode::OK);
    let users: Vec<User> = serde_json::from_str(&body).unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].name, "user1");
    assert_eq!(users[2].email, "user3@example.com");
}

#[tokio::test]
async fn test_list_users_limit_is_clamped() {
    let store = Arc::new(MemoryStore::with_users(5));
    let router = build_router(&test_config(), store.clone());

    let (status, body) = send_get(router.clone(), "/users?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<User> = serde_json::from_str(&body).unwrap();
    assert_eq!(users.len(), 2);

    send_get(router.clone(), "/users?limit=50000").await;
    send_get(router, "/users?limit=0").await;

    assert_eq!(*store.limits.lock().unwrap(), vec![2, 1000, 100]);
}

#[tokio::test]
async fn test_list_users_storage_failure() {
    let router = build_router(&test_config(), Arc::new(MemoryStore::down()));
    let (status, body) = send_get(router, "/users").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_users_route_requires_rest_feature() {
    let mut config = test_config();
    config.features.enable_rest = false;

    let router = build_router(&config, Arc::new(MemoryStore::with_users(1)));
    let (status, _) = send_get(router, "/users").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_playground_enabled() {
    let mut config = test_config();
    config.graphql.playground = "explore".to_string();
    config.graphql.endpoint = "/api/graphql".to_string();

    let router = build_router(&config, Arc::new(MemoryStore::default()));
    let (status, body) = send_get(router, "/explore").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("GraphQL Playground"));
    assert!(body.contains("/api/graphql"));
}

#[tokio::test]
async fn test_playground_disabled() {
    let mut config = test_config();
    config.graphql.playground_enabled = false;

    let router = build_router(&config, Arc::new(MemoryStore::default()));
    let (status, _) = send_get(router, "/playground").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_playground_on_fixed_route_is_skipped() {
    let mut config = test_config();
    config.graphql.playground = "/health".to_string();

    let router = build_router(&config, Arc::new(MemoryStore::default()));
    let (status, body) = send_get(router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_playground_with_braces_is_skipped() {
    let mut config = test_config();
    config.graphql.playground = "/play{ground".to_string();

    let router = build_router(&config, Arc::new(MemoryStore::default()));
    let (status, body) = send_get(router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello, GraphQL Lab!");
}

#[tokio::test]
async fn test_playground_may_use_users_path_without_rest() {
    let mut config = test_config();
    config.features.enable_rest = false;
    config.graphql.playground = "/users".to_string();

    let router = build_router(&config, Arc::new(MemoryStore::default()));
    let (status, body) = send_get(router, "/users").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("GraphQL Playground"));
}

#[test]
fn test_playground_conflict() {
    let registered = ["/", "/health", "/users"];
    assert!(playground_conflict("/", &registered).is_some());
    assert!(playground_conflict("/users", &registered).is_some());
    assert!(playground_conflict("/{id}", &registered).is_some());
    assert!(playground_conflict("/:id", &registered).is_some());
    assert!(playground_conflict("/gql/*rest", &registered).is_some());
    assert!(playground_conflict("/playground", &registered).is_none());
}

#[test]
fn test_listen_addr() {
    let mut server = ServerConfig::default();
    assert_eq!(listen_addr(&server), "0.0.0.0:8080");

    server.host = "127.0.0.1".to_string();
    server.port = 9000;
    assert_eq!(listen_addr(&server), "127.0.0.1:9000");
}

#[test]
fn test_route_path() {
    assert_eq!(route_path("", "/playground"), "/playground");
    assert_eq!(route_path("/gql", "/playground"), "/gql");
    assert_eq!(route_path("gql", "/playground"), "/gql");
}
