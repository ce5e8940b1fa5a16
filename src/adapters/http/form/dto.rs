//! HTTP DTOs for form generation endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::form::FormGenerationError;
use crate::domain::foundation::ErrorCode;
use crate::ports::BackendError;

const TEXT_EXCERPT_LIMIT: usize = 512;

const IRRELEVANT_DEFAULT_MESSAGE: &str =
    "The request does not seem to be about creating a form. Please describe the form you would like to build.";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to generate a form configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFormRequest {
    /// Natural-language description of the desired form.
    pub prompt: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }
}

impl From<&FormGenerationError> for ErrorResponse {
    fn from(error: &FormGenerationError) -> Self {
        let stage = error.stage().as_str();

        match error {
            FormGenerationError::Request(e) => {
                Self::new(error.code(), e.to_string()).with_details(json!({ "stage": stage }))
            }
            FormGenerationError::Backend(e) => {
                Self::new(error.code(), "The form generation service failed")
                    .with_details(backend_details(stage, e))
            }
            FormGenerationError::Extraction { key } => Self::new(
                error.code(),
                "The form generation service returned no text",
            )
            .with_details(json!({ "stage": stage, "key": key })),
            FormGenerationError::Decode(e) => {
                Self::new(error.code(), "The generated form config is not valid JSON")
                    .with_details(json!({
                        "stage": stage,
                        "reason": e.reason,
                        "text": excerpt(&e.text),
                    }))
            }
            FormGenerationError::Schema(e) => Self::new(error.code(), error.to_string())
                .with_details(json!({ "stage": stage, "missing": e.member() })),
            FormGenerationError::IrrelevantPrompt { message } => Self::new(
                error.code(),
                message.as_deref().unwrap_or(IRRELEVANT_DEFAULT_MESSAGE),
            ),
        }
    }
}

fn backend_details(stage: &str, error: &BackendError) -> Value {
    match error {
        BackendError::Timeout { timeout_ms } => {
            json!({ "stage": stage, "reason": "timeout", "timeout_ms": timeout_ms })
        }
        BackendError::Network(message) => {
            json!({ "stage": stage, "reason": "network", "error": message })
        }
        BackendError::Status { status, body } => json!({
            "stage": stage,
            "reason": "status",
            "upstream_status": status,
            "body": excerpt(body),
        }),
        BackendError::MalformedResponse(message) => {
            json!({ "stage": stage, "reason": "malformed_response", "error": message })
        }
    }
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(TEXT_EXCERPT_LIMIT) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}
