//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use voyage_server::{create_router, AppState, AuthService};
use voyage_storage::SqliteStorage;

pub const TEST_SECRET: &str = "test-secret-key";

/// A router over a fresh on-disk database
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let storage = SqliteStorage::connect(&db_url)
            .await
            .expect("Failed to open test database");

        // Minimum bcrypt cost keeps the suite fast
        let auth_service = AuthService::new(TEST_SECRET, 1).with_cost(4);
        let state = AppState::new(Arc::new(storage), Arc::new(auth_service));

        Self {
            router: create_router(state.clone()),
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and return status plus parsed JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Register through the API and return `(token, user_id)`
    pub async fn register(&self, name: &str, email: &str) -> (String, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": fixtures::TEST_PASSWORD
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }
}

/// Test fixtures
pub mod fixtures {
    use serde_json::{json, Value};

    pub const TEST_PASSWORD: &str = "TestPassword123!";

    pub fn europe_trip() -> Value {
        json!({
            "title": "Europe Trip",
            "destinations": [{
                "location": "Paris",
                "startDate": "2024-06-01",
                "endDate": "2024-06-05"
            }]
        })
    }
}
