//! Gemini Backend - Implementation of GenerativeBackend for Google's Gemini API.
//!
//! Calls the non-streaming `generateContent` endpoint with a single user
//! turn and hands the decoded reply back untouched.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let backend = GeminiBackend::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::domain::form::ResponseEnvelope;
use crate::ports::{BackendError, BackendInfo, GenerativeBackend};

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const ERROR_BODY_LIMIT: usize = 2048;

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, sent as the `key` query parameter.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Creates a configuration from an already-wrapped secret.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            ..Self::new(String::new())
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API backend.
pub struct GeminiBackend {
    config: GeminiConfig,
    client: Client,
}

impl GeminiBackend {
    /// Creates a new backend with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL (without the key).
    fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn map_transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::timeout(self.config.timeout)
        } else if e.is_connect() {
            BackendError::network(format!("connection failed: {}", e.without_url()))
        } else {
            BackendError::network(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate_content(&self, prompt: &str) -> Result<ResponseEnvelope, BackendError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "calling gemini");

        let response = self
            .client
            .post(self.endpoint_url())
            .query(&[("key", self.config.api_key())])
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            tracing::warn!(status = status.as_u16(), "gemini returned an error status");
            return Err(BackendError::status(
                status.as_u16(),
                truncate(&text, ERROR_BODY_LIMIT),
            ));
        }

        let envelope: ResponseEnvelope = serde_json::from_slice(&body)
            .map_err(|e| BackendError::malformed(format!("response is not JSON: {}", e)))?;

        if !envelope.is_object() {
            return Err(BackendError::malformed(format!(
                "expected a JSON object, found {}",
                envelope.kind()
            )));
        }

        Ok(envelope)
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new("gemini", self.config.model.clone())
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

// ════════════════════════════════════════════════════════════════════════════
// Gemini API types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::TEXT_KEY;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn backend_for(base_url: &str) -> GeminiBackend {
        let config = GeminiConfig::new("test-key")
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5));
        GeminiBackend::new(config).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-2.0-pro")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(config.model, "gemini-2.0-pro");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_defaults() {
        let config = GeminiConfig::new("k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_debug_does_not_leak_key() {
        let config = GeminiConfig::new("super-secret-key");
        assert!(!format!("{:?}", config).contains("super-secret-key"));
    }

    #[test]
    fn endpoint_url_includes_model() {
        let backend = backend_for("https://example.test/v1beta/");
        assert_eq!(
            backend.endpoint_url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn backend_info_reports_model() {
        let info = backend_for("http://localhost").backend_info();
        assert_eq!(info, BackendInfo::new("gemini", "gemini-2.5-flash"));
    }

    #[test]
    fn request_body_has_gemini_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééé", 3), "é");
    }

    #[tokio::test]
    async fn sends_prompt_and_returns_envelope() {
        let router = Router::new().route(
            "/models/:call",
            post(
                |Path(call): Path<String>,
                 Query(query): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(call, "gemini-2.5-flash:generateContent");
                    assert_eq!(query.get("key").map(String::as_str), Some("test-key"));
                    let prompt = body["contents"][0]["parts"][0]["text"].clone();
                    Json(json!({
                        "candidates": [{ "content": { "parts": [{ "text": prompt }], "role": "model" } }]
                    }))
                },
            ),
        );
        let backend = backend_for(&serve(router).await);

        let envelope = backend.generate_content("make a form").await.unwrap();

        assert_eq!(envelope.find_text(TEXT_KEY), Some("make a form"));
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let router = Router::new().route(
            "/models/:call",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exhausted") }),
        );
        let backend = backend_for(&serve(router).await);

        let err = backend.generate_content("x").await.unwrap_err();

        assert_eq!(err, BackendError::status(429, "quota exhausted"));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let router = Router::new().route("/models/:call", post(|| async { "<html>oops</html>" }));
        let backend = backend_for(&serve(router).await);

        let err = backend.generate_content("x").await.unwrap_err();

        assert!(matches!(err, BackendError::MalformedResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn non_object_body_is_malformed() {
        let router = Router::new().route("/models/:call", post(|| async { Json(json!([1, 2])) }));
        let backend = backend_for(&serve(router).await);

        let err = backend.generate_content("x").await.unwrap_err();

        assert_eq!(
            err,
            BackendError::malformed("expected a JSON object, found array")
        );
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let router = Router::new().route(
            "/models/:call",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        );
        let base_url = serve(router).await;
        let config = GeminiConfig::new("k")
            .with_base_url(base_url)
            .with_timeout(Duration::from_millis(100));
        let backend = GeminiBackend::new(config).unwrap();

        let err = backend.generate_content("x").await.unwrap_err();

        assert_eq!(err, BackendError::Timeout { timeout_ms: 100 });
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = backend_for(&format!("http://{}", addr));

        let err = backend.generate_content("x").await.unwrap_err();

        assert!(matches!(err, BackendError::Network(_)), "{err:?}");
    }
}
