//! Shared helpers for the HTTP integration tests.
//!
//! The `#![allow(dead_code)]` attribute is needed because every integration
//! test file compiles this module separately.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

use taskdesk::api::{AppState, create_router};
use taskdesk::auth::TokenVerifier;
use taskdesk::infrastructure::InMemoryTaskRepository;

pub const SECRET: &[u8] = b"integration-test-secret";

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

pub const ISSUER: &str = "taskdesk";

// =============================================================================
// Router Construction
// =============================================================================

/// Router over an empty in-memory store, no CORS origins.
pub fn test_router() -> Router {
    router_with_verifier(TokenVerifier::new(SECRET, None))
}

/// Like [`test_router`], but tokens must carry `iss` = [`ISSUER`].
pub fn test_router_with_issuer() -> Router {
    router_with_verifier(TokenVerifier::new(SECRET, Some(ISSUER)))
}

fn router_with_verifier(verifier: TokenVerifier) -> Router {
    let state = AppState::new(Arc::new(InMemoryTaskRepository::new()), verifier);
    create_router(state, &[])
}

// =============================================================================
// Tokens
// =============================================================================

/// A valid token for `subject`, expiring in one hour.
pub fn token_for(subject: &str) -> String {
    sign(&json!({
        "sub": subject,
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    }))
}

/// A token for `subject` that expired an hour ago.
pub fn expired_token_for(subject: &str) -> String {
    sign(&json!({
        "sub": subject,
        "exp": (Utc::now() - Duration::hours(1)).timestamp(),
    }))
}

pub fn sign(claims: &Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

// =============================================================================
// Requests
// =============================================================================

/// Response status, headers and parsed JSON body (`Value::Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response: Response<Body> = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

/// Sends a request as `subject`, with an optional JSON body.
pub async fn send_as(
    router: &Router,
    subject: &str,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> TestResponse {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(subject)));

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(router, request).await
}

/// Creates a task as `subject` and returns the response body.
pub async fn create_task_as(router: &Router, subject: &str, title: &str) -> Value {
    let response = send_as(
        router,
        subject,
        "POST",
        "/api/v1/tasks",
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body
}

pub fn task_uri(id: &Value) -> String {
    format!("/api/v1/tasks/{}", id.as_str().unwrap())
}
