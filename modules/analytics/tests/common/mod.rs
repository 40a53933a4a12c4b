#![allow(dead_code)]

use analytics_rs::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request};
use axum::Router;
use http_body_util::BodyExt;
use kv_store::{InMemoryKv, KvStore, StoreError, StoreResult};
use std::sync::Arc;
use std::time::Duration;

/// Build the service router over a fresh in-memory store.
/// Returns the router and a handle onto the same store for assertions.
pub fn app() -> (Router, InMemoryKv) {
    let kv = InMemoryKv::new();
    let router = app_with_store(Arc::new(kv.clone()));
    (router, kv)
}

pub fn app_with_store(store: Arc<dyn KvStore>) -> Router {
    analytics_rs::app(Arc::new(AppState::with_defaults(store)))
}

pub fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/track")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Read response body as bytes.
pub async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Read response body as a UTF-8 string.
pub async fn body_string(response: axum::http::Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Read response body as JSON.
pub async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

/// Store whose writes always fail
pub struct FailingStore;

#[async_trait]
impl KvStore for FailingStore {
    async fn put(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> StoreResult<()> {
        Err(StoreError::PutError("quota exceeded".to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::ConnectionError("unavailable".to_string()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
