//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - An app wired to an in-memory store (or any injected store)
//! - Store doubles that fail on every call or only on writes
//! - Request helpers returning status, headers and parsed JSON body

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;
use userreg_api::app::{build_router, AppState};
use userreg_shared::models::user::User;
use userreg_shared::store::{InMemoryUserStore, StoreError, StoreResult, UserStore};
use uuid::Uuid;

/// Test context containing the app and the store behind it
pub struct TestContext {
    pub store: Arc<InMemoryUserStore>,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context over an empty in-memory store
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Creates a context over a store seeded with `users`
    pub fn with_users(users: Vec<User>) -> Self {
        let store = Arc::new(InMemoryUserStore::with_users(users));
        let app = build_router(AppState::new(store.clone()));
        TestContext { store, app }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        send(&self.app, request).await
    }

    /// POSTs a raw body to the create endpoint
    pub async fn create_raw(&self, body: impl Into<Body>) -> TestResponse {
        self.send(create_request(body)).await
    }

    /// POSTs a JSON value to the create endpoint
    pub async fn create(&self, body: Value) -> TestResponse {
        self.create_raw(body.to_string()).await
    }

    /// GETs the lookup endpoint with a raw query string
    pub async fn get(&self, query: &str) -> TestResponse {
        self.send(get_request(query)).await
    }
}

/// Response pieces tests care about
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `error` field of an error body
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// Asserts the wildcard CORS headers are present
    pub fn assert_cors(&self) {
        assert_eq!(self.headers["access-control-allow-origin"], "*");
        assert!(self.headers.contains_key("access-control-allow-headers"));
        assert!(self.headers.contains_key("access-control-allow-methods"));
    }
}

/// Builds a create request
pub fn create_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/users")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Builds a lookup request; `query` is appended verbatim after `?`
pub fn get_request(query: &str) -> Request<Body> {
    let uri = if query.is_empty() {
        "/v1/users".to_string()
    } else {
        format!("/v1/users?{}", query)
    };

    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends a request through any router
pub async fn send(app: &axum::Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().call(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&bytes)
            )
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Percent-encodes an email for use in a query string
pub fn encode_email(email: &str) -> String {
    email
        .replace('%', "%25")
        .replace('+', "%2B")
        .replace('@', "%40")
        .replace(' ', "%20")
}

/// Builds a stored user record with a fresh id
pub fn stored_user(email: &str, name: Option<&str>) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: name.map(str::to_string),
    }
}

/// Store double whose every call fails, like a deleted table
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn query_by_email(&self, _email: &str) -> StoreResult<Vec<User>> {
        Err(StoreError::Backend(
            "Requested resource not found: table users-dev".to_string(),
        ))
    }

    async fn get_by_id(&self, _id: Uuid) -> StoreResult<Option<User>> {
        Err(StoreError::Backend(
            "Requested resource not found: table users-dev".to_string(),
        ))
    }

    async fn put(&self, _user: &User) -> StoreResult<()> {
        Err(StoreError::Backend(
            "Requested resource not found: table users-dev".to_string(),
        ))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Err(StoreError::Backend("store unreachable".to_string()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Store double that answers queries but rejects writes
pub struct ReadOnlyStore;

#[async_trait]
impl UserStore for ReadOnlyStore {
    async fn query_by_email(&self, _email: &str) -> StoreResult<Vec<User>> {
        Ok(Vec::new())
    }

    async fn get_by_id(&self, _id: Uuid) -> StoreResult<Option<User>> {
        Ok(None)
    }

    async fn put(&self, _user: &User) -> StoreResult<()> {
        Err(StoreError::Backend("write capacity exceeded".to_string()))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "read-only"
    }
}

/// Builds a router over an arbitrary store
pub fn app_with_store(store: Arc<dyn UserStore>) -> axum::Router {
    build_router(AppState::new(store))
}
