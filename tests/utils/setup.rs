//! Test setup - builds the full router over an in-memory store
#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use companies_api::{
    build_router, AppState, CredentialStore, InMemoryCompanyRepository, TokenService,
};

pub const TEST_SECRET: &str = "integration-secret";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub tokens: TokenService,
    pub repository: Arc<InMemoryCompanyRepository>,
}

/// Outcome of one request, with the body already parsed as JSON
pub struct ApiResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl ApiResponse {
    /// The `name=value` part of the Set-Cookie header, ready to send back
    pub fn cookie(&self) -> String {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .expect("response did not set a cookie")
            .to_string()
    }

    pub fn token(&self) -> String {
        self.cookie()
            .strip_prefix("token=")
            .expect("cookie is not the session token")
            .to_string()
    }
}

pub struct TestAppBuilder {
    lifetime_secs: i64,
    users: HashMap<String, String>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            lifetime_secs: 300,
            users: HashMap::from([
                ("user1".to_string(), "password1".to_string()),
                ("user2".to_string(), "password2".to_string()),
            ]),
        }
    }

    pub fn with_lifetime_secs(mut self, lifetime_secs: i64) -> Self {
        self.lifetime_secs = lifetime_secs;
        self
    }

    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.users
            .insert(username.to_string(), password.to_string());
        self
    }

    pub fn build(self) -> TestApp {
        let tokens = TokenService::new(TEST_SECRET, self.lifetime_secs);
        let repository = Arc::new(InMemoryCompanyRepository::new());
        let state = AppState::new(
            tokens.clone(),
            Arc::new(CredentialStore::new(self.users)),
            repository.clone(),
        );

        TestApp {
            router: build_router(state),
            tokens,
            repository,
        }
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        ApiResponse {
            status,
            set_cookie,
            body,
        }
    }

    pub async fn send_raw(&self, method: Method, uri: &str, cookie: &str, raw: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap().status()
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResponse {
        self.send(
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Logs in and returns the cookie to send on protected requests
    pub async fn login_cookie(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK);
        response.cookie()
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
