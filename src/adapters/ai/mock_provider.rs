//! Mock generative backend for testing.
//!
//! Lets tests drive the form pipeline without calling Gemini.
//!
//! # Features
//!
//! - Queued replies, consumed in order
//! - Simulated latency for timeout testing
//! - Error injection
//! - Prompt recording for verification
//!
//! # Example
//!
//! ```ignore
//! let backend = MockGenerativeBackend::new()
//!     .with_text("{\"fields\":[],\"submit\":{}}")
//!     .with_delay(Duration::from_millis(100));
//!
//! let envelope = backend.generate_content("a contact form").await?;
//! ```

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::form::ResponseEnvelope;
use crate::ports::{BackendError, BackendInfo, GenerativeBackend};

/// A queued mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Envelope(ResponseEnvelope),
    Error(BackendError),
}

/// Mock backend with a reply queue.
///
/// Clones share the queue and the call history.
#[derive(Debug, Clone)]
pub struct MockGenerativeBackend {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    info: BackendInfo,
    delay: Duration,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockGenerativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerativeBackend {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            info: BackendInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a Gemini-shaped reply whose single part holds `text`.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let envelope = ResponseEnvelope::from(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text.into() }], "role": "model" },
                "finishReason": "STOP"
            }]
        }));
        self.with_envelope(envelope)
    }

    /// Queues an arbitrary envelope.
    pub fn with_envelope(self, envelope: ResponseEnvelope) -> Self {
        lock(&self.replies).push_back(MockReply::Envelope(envelope));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: BackendError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    // An empty queue answers with a network error so unexpected calls fail loudly.
    fn next_reply(&self) -> MockReply {
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| MockReply::Error(BackendError::network("no mock reply queued")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl GenerativeBackend for MockGenerativeBackend {
    async fn generate_content(&self, prompt: &str) -> Result<ResponseEnvelope, BackendError> {
        lock(&self.prompts).push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Envelope(envelope) => Ok(envelope),
            MockReply::Error(error) => Err(error),
        }
    }

    fn backend_info(&self) -> BackendInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::TEXT_KEY;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let backend = MockGenerativeBackend::new()
            .with_text("first")
            .with_error(BackendError::status(500, "boom"));

        let first = backend.generate_content("a").await.unwrap();
        assert_eq!(first.find_text(TEXT_KEY), Some("first"));

        let second = backend.generate_content("b").await.unwrap_err();
        assert_eq!(second, BackendError::status(500, "boom"));
    }

    #[tokio::test]
    async fn empty_queue_yields_network_error() {
        let backend = MockGenerativeBackend::new();
        let err = backend.generate_content("x").await.unwrap_err();
        assert!(matches!(err, BackendError::Network(_)));
    }

    #[tokio::test]
    async fn records_prompts() {
        let backend = MockGenerativeBackend::new().with_text("{}").with_text("{}");

        backend.generate_content("one").await.unwrap();
        backend.generate_content("two").await.unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(backend.prompts(), vec!["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn clones_share_history() {
        let backend = MockGenerativeBackend::new().with_text("{}");
        let clone = backend.clone();

        clone.generate_content("via clone").await.unwrap();

        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let backend = MockGenerativeBackend::new()
            .with_text("{}")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        backend.generate_content("x").await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
