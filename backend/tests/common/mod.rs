//! Common test utilities for integration tests
//!
//! Each `TestApp` owns a private in-memory database with the schema
//! applied, so tests run in parallel without sharing state.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use medtrack_backend::{
    config::{AppConfig, AuthConfig, DatabaseConfig, JwtConfig, ServerConfig},
    db, routes,
    state::AppState,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub async fn new() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create test database pool");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), test_config());
        let app = routes::create_router(state.clone());

        Self { app, pool, state }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&body).into_owned())
            })
        };

        (status, value)
    }

    fn request(
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(Self::request("GET", path, None, None)).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Self::request("POST", path, None, Some(body))).await
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send(Self::request("GET", path, Some(token), None)).await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Self::request("POST", path, Some(token), Some(body))).await
    }

    /// Make an authenticated PUT request with JSON body
    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (StatusCode, Value) {
        self.send(Self::request("PUT", path, Some(token), Some(body))).await
    }

    /// Make an authenticated DELETE request
    pub async fn delete_auth(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send(Self::request("DELETE", path, Some(token), None)).await
    }

    /// Register a patient and return the issued token
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/register",
                &json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        body["token"]
            .as_str()
            .expect("register response has a token")
            .to_string()
    }

    /// Create a medication and return its id
    pub async fn create_medication(&self, token: &str, body: &Value) -> i64 {
        let (status, body) = self.post_auth("/api/medications", token, body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["id"].as_i64().expect("medication response has an id")
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            token_expiry_secs: 7 * 24 * 60 * 60,
        },
        // Minimum cost keeps hashing fast in tests
        auth: AuthConfig { bcrypt_cost: 4 },
    }
}

/// Assert the standard error envelope and return its code
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"]
        .as_str()
        .unwrap_or_else(|| panic!("not an error body: {}", body))
}
