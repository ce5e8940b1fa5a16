//! Generative Backend Port - Interface to the text-generation service.
//!
//! The form pipeline sends one composed prompt and gets back the backend's
//! raw reply as a [`ResponseEnvelope`]. Adapters own transport, credentials
//! and timeouts; they do not interpret the reply beyond checking that it is
//! a JSON object.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoBackend;
//!
//! #[async_trait]
//! impl GenerativeBackend for EchoBackend {
//!     async fn generate_content(&self, prompt: &str) -> Result<ResponseEnvelope, BackendError> {
//!         Ok(ResponseEnvelope::from(serde_json::json!({ "text": prompt })))
//!     }
//!
//!     fn backend_info(&self) -> BackendInfo {
//!         BackendInfo::new("echo", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::form::ResponseEnvelope;

/// Port for generative-language backends.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Sends `prompt` and returns the backend's decoded reply.
    ///
    /// A successful return is always a JSON object envelope.
    async fn generate_content(&self, prompt: &str) -> Result<ResponseEnvelope, BackendError>;

    /// Name and model of the backend, for logs.
    fn backend_info(&self) -> BackendInfo;
}

/// Identifies a backend implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendInfo {
    /// Backend name (e.g., "gemini").
    pub name: String,
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
}

impl BackendInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Failures of the outbound generation call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The call did not complete in time.
    #[error("backend timed out after {timeout_ms}ms")]
    Timeout {
        /// Budget that expired.
        timeout_ms: u64,
    },

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The reply was not a JSON object.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    /// Creates a timeout error from the expired budget.
    pub fn timeout(budget: std::time::Duration) -> Self {
        Self::Timeout {
            timeout_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Returns true if the call ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout { .. })
    }

    /// Upstream HTTP status, when the backend answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
