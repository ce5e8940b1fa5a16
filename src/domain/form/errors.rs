//! Error taxonomy of the form generation pipeline.

use thiserror::Error;

use super::decoder::DecodeError;
use super::stage::GenerationStage;
use super::validator::{IrrelevantPromptSignal, SchemaError};
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::BackendError;

/// Why a generation run did not produce a form configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormGenerationError {
    /// The caller's request was rejected before any backend call.
    #[error("invalid request: {0}")]
    Request(#[from] ValidationError),

    /// The backend call failed.
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),

    /// The backend reply carried no text payload.
    #[error("no '{key}' payload found in backend response")]
    Extraction { key: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("generated config is invalid: {0}")]
    Schema(#[from] SchemaError),

    /// The model judged the request unrelated to form creation.
    #[error("prompt is not about creating a form")]
    IrrelevantPrompt { message: Option<String> },
}

impl FormGenerationError {
    pub fn extraction(key: impl Into<String>) -> Self {
        Self::Extraction { key: key.into() }
    }

    pub fn irrelevant(signal: &IrrelevantPromptSignal) -> Self {
        Self::IrrelevantPrompt {
            message: signal.message().map(str::to_owned),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FormGenerationError::Request(_) => ErrorCode::InvalidRequest,
            FormGenerationError::Backend(_) => ErrorCode::BackendError,
            FormGenerationError::Extraction { .. } => ErrorCode::ExtractionFailed,
            FormGenerationError::Decode(_) => ErrorCode::DecodeFailed,
            FormGenerationError::Schema(_) => ErrorCode::SchemaViolation,
            FormGenerationError::IrrelevantPrompt { .. } => ErrorCode::IrrelevantPrompt,
        }
    }

    /// Stage the failure originated in.
    pub fn stage(&self) -> GenerationStage {
        match self {
            FormGenerationError::Request(_) => GenerationStage::Composing,
            FormGenerationError::Backend(_) => GenerationStage::AwaitingBackend,
            FormGenerationError::Extraction { .. } => GenerationStage::Extracting,
            FormGenerationError::Decode(_) => GenerationStage::Decoding,
            FormGenerationError::Schema(_) | FormGenerationError::IrrelevantPrompt { .. } => {
                GenerationStage::Validating
            }
        }
    }

    /// True when the backend or its output is at fault rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            FormGenerationError::Backend(_)
                | FormGenerationError::Extraction { .. }
                | FormGenerationError::Decode(_)
                | FormGenerationError::Schema(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::domain::form::validator::{validate, GenerationOutcome};

    #[test]
    fn codes_match_variants() {
        let cases = [
            (
                FormGenerationError::from(ValidationError::empty_field("prompt")),
                "INVALID_REQUEST",
            ),
            (
                FormGenerationError::from(BackendError::network("refused")),
                "BACKEND_ERROR",
            ),
            (FormGenerationError::extraction("text"), "EXTRACTION_FAILED"),
            (
                FormGenerationError::from(DecodeError::new("x", "bad")),
                "DECODE_FAILED",
            ),
            (
                FormGenerationError::from(SchemaError::MissingFields),
                "SCHEMA_VIOLATION",
            ),
            (
                FormGenerationError::IrrelevantPrompt { message: None },
                "IRRELEVANT_PROMPT",
            ),
        ];

        for (err, code) in cases {
            assert_eq!(err.code().as_str(), code, "{err}");
        }
    }

    #[test]
    fn stages_match_variants() {
        assert_eq!(
            FormGenerationError::from(ValidationError::empty_field("prompt")).stage(),
            GenerationStage::Composing
        );
        assert_eq!(
            FormGenerationError::from(BackendError::network("x")).stage(),
            GenerationStage::AwaitingBackend
        );
        assert_eq!(
            FormGenerationError::extraction("text").stage(),
            GenerationStage::Extracting
        );
        assert_eq!(
            FormGenerationError::from(DecodeError::new("", "eof")).stage(),
            GenerationStage::Decoding
        );
        assert_eq!(
            FormGenerationError::from(SchemaError::MissingSubmit).stage(),
            GenerationStage::Validating
        );
    }

    #[test]
    fn irrelevant_carries_model_message() {
        let object = match json!({ "error": "IrrelevantPrompt", "message": "Not a form." }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let signal = match validate(object).unwrap() {
            GenerationOutcome::Irrelevant(signal) => signal,
            other => panic!("expected irrelevant, got {other:?}"),
        };

        let err = FormGenerationError::irrelevant(&signal);
        assert_eq!(
            err,
            FormGenerationError::IrrelevantPrompt {
                message: Some("Not a form.".to_string())
            }
        );
        assert!(!err.is_upstream());
    }

    #[test]
    fn schema_message_names_missing_member() {
        let err = FormGenerationError::from(SchemaError::MissingFields);
        assert_eq!(err.to_string(), "generated config is invalid: missing fields");
        assert!(err.is_upstream());
    }
}
