use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use storefront_notifier::{
    api::{AppState, build_router},
    clients::Notifier,
    config::Config,
    models::delivery::DeliveryResult,
};
use tower::ServiceExt;

/// Notifier double that records every message it is asked to send.
pub struct RecordingNotifier {
    succeed: bool,
    configured: bool,
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            succeed: true,
            configured: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            succeed: false,
            configured: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            succeed: false,
            configured: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_message(&self) -> Option<String> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> DeliveryResult {
        self.sent.lock().unwrap().push(text.to_string());

        if self.succeed {
            DeliveryResult::success()
        } else {
            DeliveryResult::failure("recording notifier set to fail")
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

pub fn config_with(vars: &[(&str, &str)]) -> Config {
    Config::from_vars(
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
    .unwrap()
}

pub fn test_app(notifier: Arc<dyn Notifier>) -> Router {
    let config = config_with(&[]);
    build_router(AppState::new(&config, notifier), &config.site_dir)
}

pub fn test_app_with_site(notifier: Arc<dyn Notifier>, site_dir: &Path) -> Router {
    let config = config_with(&[]);
    build_router(AppState::new(&config, notifier), site_dir)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

pub async fn call(app: Router, method: Method, uri: &str, body: &str) -> Result<TestResponse> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;

    let response = app.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await?.to_bytes();

    Ok(TestResponse {
        status,
        headers,
        body,
    })
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Result<TestResponse> {
    call(app, Method::POST, uri, body).await
}

pub fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .and_then(|v| v.to_str().ok()),
        Some("Content-Type")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok()),
        Some("POST, OPTIONS")
    );
}

pub const GREEN_TEA_ORDER: &str = r#"{
    "contactType": "telegram",
    "contact": "@alice",
    "items": [{"name": "Green Tea", "detail": "100g", "total": 500}],
    "total": 500
}"#;
