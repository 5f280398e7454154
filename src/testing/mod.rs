use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::api;
use crate::config::DatabaseConfig;
use crate::database::{PizzeriaService, Store};
use crate::handlers::AppState;

/// In-memory store plus the router wired to it
pub struct TestContext {
    pub service: PizzeriaService,
    app: Router,
}

impl TestContext {
    /// Migrated, empty store
    pub async fn new() -> anyhow::Result<Self> {
        let store = Store::connect(&DatabaseConfig::in_memory()).await?;
        store.migrate().await?;

        let service = PizzeriaService::new(store);
        let app = api::router(AppState::new(service.clone()));

        Ok(Self { service, app })
    }

    /// Store holding the sample data set
    pub async fn seeded() -> anyhow::Result<Self> {
        let ctx = Self::new().await?;
        ctx.service.seed().await?;
        Ok(ctx)
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, Body::empty()).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        let bytes = serde_json::to_vec(&body).expect("Failed to serialize body");
        self.send(Method::POST, uri, Some("application/json"), Body::from(bytes))
            .await
    }

    /// POST an arbitrary body with the given content type
    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(content_type), Body::from(body.to_string()))
            .await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();

        TestResponse {
            status,
            content_type,
            body,
        }
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }
}
