//! # Common Test Utilities
//!
//! Provides shared test infrastructure: an in-memory database with the real
//! migrations applied, and helpers to drive the router end to end.

#![allow(dead_code)]

use std::sync::Once;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use serde_json::Value;
use server::{create_app_router, AppState, Settings};
use tower::ServiceExt;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Create test app state backed by a fresh in-memory database
pub async fn create_test_app_state() -> AppState {
    init_test_env();
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    AppState::new(db, Settings::default())
}

/// A router plus its state, for tests that inspect the database directly
pub struct TestApp {
    pub state:  AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = create_test_app_state().await;
        let router = create_app_router(state.clone());
        Self {
            state,
            router,
        }
    }

    /// Send a request and decode the JSON response body (Null when empty)
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder
                    .header("content-type", "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap()
            },
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        }
        else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) { self.request(Method::GET, uri, None).await }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) { self.request(Method::DELETE, uri, None).await }

    /// Create a department and return its id
    pub async fn department(&self, name: &str, parent_id: Option<i64>) -> i64 {
        let (status, body) = self
            .post(
                "/departments/",
                serde_json::json!({ "name": name, "parent_id": parent_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create {}: {}", name, body);
        body["id"].as_i64().unwrap()
    }

    /// Create an employee and return its id
    pub async fn employee(&self, department_id: i64, full_name: &str) -> i64 {
        let (status, body) = self
            .post(
                &format!("/departments/{}/employees/", department_id),
                serde_json::json!({ "full_name": full_name, "position": "Engineer" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create {}: {}", full_name, body);
        body["id"].as_i64().unwrap()
    }
}
