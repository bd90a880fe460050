//! Common test utilities for integration tests.
//!
//! This module provides:
//!
//! - [`app_builder::TestAppBuilder`] - Build test Axum apps that mirror main.rs wiring
//! - [`get_json`] - Issue a GET through `oneshot` and decode the JSON body
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::{app_builder::TestAppBuilder, get_json};
//!
//! #[tokio::test]
//! async fn test_with_app() {
//!     let app = TestAppBuilder::rest_only().build();
//!     let (status, body) = get_json(&app, "/api/v1/deputados").await;
//! }
//! ```

#![allow(dead_code)]

pub mod app_builder;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Send `GET uri` to `app` and parse the response body as JSON.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let body_bytes = to_bytes(response.into_body(), 4 * 1024 * 1024)
        .await
        .expect("body");
    let json: Value = serde_json::from_slice(&body_bytes).expect("Response should be valid JSON");

    (status, json)
}

/// Assert the `{ error: { code, message } }` envelope.
pub fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["error"]["code"], code, "unexpected body: {body}");
    assert!(
        body["error"]["message"]
            .as_str()
            .is_some_and(|m| !m.is_empty()),
        "missing message: {body}"
    );
}
