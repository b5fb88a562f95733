//! Application test fixture
//!
//! Builds the full router around a `MemoryStore` (or any other `Store`) and
//! sends requests through it without binding a socket.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use parley::backend::server::app_with_store;
use parley::backend::store::{MemoryStore, Store};
use parley::shared::AppConfig;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Configuration with a cheap bcrypt cost so tests stay fast
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(4)
        .build()
        .expect("test configuration should be valid")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// An account registered through the API
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub phone_number: i64,
    pub password: String,
    pub token: String,
}

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            router: app_with_store(store, test_config()),
        }
    }

    /// Send one request and return the status and the decoded JSON body.
    /// An empty body decodes to `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, auth_header(token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register an account and return its id and token.
    pub async fn register(&self, name: &str, phone_number: i64, password: &str) -> TestUser {
        let (status, body) = self
            .post(
                "/create-account",
                None,
                serde_json::json!({
                    "name": name,
                    "phoneNumber": phone_number,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create-account failed: {}", body);

        TestUser {
            id: body["user"]["id"].as_str().expect("user id").to_string(),
            name: name.to_string(),
            phone_number,
            password: password.to_string(),
            token: body["token"].as_str().expect("token").to_string(),
        }
    }

    /// Send `content` from `sender` to the account with `phone_number`.
    pub async fn send_by_phone(
        &self,
        sender: &TestUser,
        phone_number: i64,
        content: &str,
    ) -> (StatusCode, Value) {
        self.post(
            "/message/sendByPhoneNumber",
            Some(&sender.token),
            serde_json::json!({
                "content": content,
                "recipientPhoneNumber": phone_number,
            }),
        )
        .await
    }
}
