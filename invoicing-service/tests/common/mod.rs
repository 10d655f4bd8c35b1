//! Test helpers for invoicing-service router tests.
//!
//! Routers run in-process over an in-memory store; no PostgreSQL needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use invoicing_service::config::InvoicingConfig;
use invoicing_service::models::{Invoice, User};
use invoicing_service::services::MockStore;
use invoicing_service::startup::{build_router, AppState};
use invoicing_service::utils::{hash_password, Password};
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_EMAIL: &str = "user@nextmail.com";
pub const TEST_PASSWORD: &str = "123456";
pub const DELBA_ID: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
pub const LEE_ID: &str = "3958dc9e-742f-4377-85e9-fec4b6a6442a";

pub fn test_config() -> InvoicingConfig {
    InvoicingConfig::from_lookup(Config::default(), |key| match key {
        "DATABASE_URL" => Some("postgres://localhost/unused".to_string()),
        "SESSION_SECURE_COOKIE" => Some("false".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn test_user() -> User {
    let hash = hash_password(&Password::new(TEST_PASSWORD.to_string())).expect("hash");
    User {
        id: Uuid::new_v4(),
        name: "User".to_string(),
        email: TEST_EMAIL.to_string(),
        password: hash.into_string(),
    }
}

pub fn test_invoice() -> Invoice {
    Invoice {
        id: Uuid::new_v4(),
        customer_id: DELBA_ID.to_string(),
        amount: 15795,
        status: "pending".to_string(),
        date: NaiveDate::from_ymd_opt(2022, 12, 6).unwrap(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MockStore>,
}

impl TestApp {
    /// App over a store holding the test user.
    pub fn spawn() -> Self {
        Self::with_store(MockStore::new().with_user(test_user()))
    }

    pub fn with_store(store: MockStore) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(test_config(), store.clone());
        Self {
            router: build_router(state),
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// Sign in as the test user and return the session cookie.
    pub async fn login(&self) -> String {
        let body = format!("email={}&password={}", TEST_EMAIL, TEST_PASSWORD);
        let response = self.post_form("/login", &body, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("login should set a session cookie")
    }
}

/// `name=value` of the first `Set-Cookie` header.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
