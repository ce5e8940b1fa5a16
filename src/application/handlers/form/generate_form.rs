//! GenerateForm - Command handler that turns a request into a form config.
//!
//! Sequences the pure pipeline stages around the single backend call:
//!
//! ```text
//! Composing → AwaitingBackend → Extracting → Sanitizing → Decoding → Validating → Succeeded
//!     └──────────────┴──────────────┴─────────────┴────────────┴────────────┴──→ Failed
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::domain::form::{
    decode, extract_text, sanitize, validate, FormConfig, FormGenerationError, GenerationOutcome,
    GenerationStage, PromptComposer, PromptRequest, ResponseEnvelope, StageTracker, TEXT_KEY,
};
use crate::domain::foundation::{TraceId, UserId};
use crate::ports::{BackendError, GenerativeBackend};

/// Default upper bound on the backend call.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Command to generate a form configuration.
#[derive(Debug, Clone)]
pub struct GenerateFormCommand {
    pub user_id: UserId,
    /// The caller's raw request text.
    pub prompt: String,
    pub trace_id: TraceId,
}

impl GenerateFormCommand {
    /// Creates a command with a fresh trace id.
    pub fn new(user_id: UserId, prompt: impl Into<String>) -> Self {
        Self {
            user_id,
            prompt: prompt.into(),
            trace_id: TraceId::new(),
        }
    }
}

/// Handler for form generation.
pub struct GenerateFormHandler {
    backend: Arc<dyn GenerativeBackend>,
    composer: PromptComposer,
    timeout: Duration,
}

impl GenerateFormHandler {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            backend,
            composer: PromptComposer::default(),
            timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }

    /// Replaces the built-in instruction template.
    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Sets the upper bound on the backend call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the pipeline and returns either a form or an irrelevant-prompt signal.
    pub async fn handle(
        &self,
        cmd: GenerateFormCommand,
    ) -> Result<GenerationOutcome, FormGenerationError> {
        let span = tracing::info_span!(
            "generate_form",
            trace_id = %cmd.trace_id,
            user_id = %cmd.user_id,
        );
        self.run_stages(cmd.prompt).instrument(span).await
    }

    /// Like [`handle`](Self::handle), but treats an irrelevant prompt as an error.
    pub async fn generate(
        &self,
        cmd: GenerateFormCommand,
    ) -> Result<FormConfig, FormGenerationError> {
        match self.handle(cmd).await? {
            GenerationOutcome::Form(config) => Ok(config),
            GenerationOutcome::Irrelevant(signal) => Err(FormGenerationError::irrelevant(&signal)),
        }
    }

    async fn run_stages(&self, prompt: String) -> Result<GenerationOutcome, FormGenerationError> {
        let mut tracker = StageTracker::new();
        let result = self.pipeline(&mut tracker, prompt).await;

        match &result {
            Ok(GenerationOutcome::Form(_)) => {
                tracker.advance(GenerationStage::Succeeded);
                tracing::info!("form config generated");
            }
            Ok(GenerationOutcome::Irrelevant(signal)) => {
                tracker.advance(GenerationStage::Succeeded);
                tracing::info!(model_message = signal.message(), "prompt judged irrelevant");
            }
            Err(e) => {
                let stage = tracker.fail();
                if e.is_upstream() {
                    tracing::warn!(%stage, code = %e.code(), error = %e, "form generation failed");
                } else {
                    tracing::info!(%stage, code = %e.code(), error = %e, "form request rejected");
                }
            }
        }

        result
    }

    async fn pipeline(
        &self,
        tracker: &mut StageTracker,
        prompt: String,
    ) -> Result<GenerationOutcome, FormGenerationError> {
        let request = PromptRequest::new(prompt)?;
        let outbound = self.composer.compose(&request);

        tracker.advance(GenerationStage::AwaitingBackend);
        let envelope = self.call_backend(&outbound).await?;

        tracker.advance(GenerationStage::Extracting);
        let text = extract_text(&envelope, TEXT_KEY)
            .ok_or_else(|| FormGenerationError::extraction(TEXT_KEY))?;

        tracker.advance(GenerationStage::Sanitizing);
        let clean = sanitize(&text);

        tracker.advance(GenerationStage::Decoding);
        let object = decode(&clean)?;

        tracker.advance(GenerationStage::Validating);
        Ok(validate(object)?)
    }

    async fn call_backend(&self, prompt: &str) -> Result<ResponseEnvelope, BackendError> {
        let info = self.backend.backend_info();
        tracing::debug!(backend = %info.name, model = %info.model, "sending prompt");

        match tokio::time::timeout(self.timeout, self.backend.generate_content(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerativeBackend;
    use crate::domain::form::{DecodeError, SchemaError};
    use crate::domain::foundation::ValidationError;
    use serde_json::json;

    const CONTACT_FORM: &str = r#"{
        "title": "Contact Us",
        "endpoint": "/api/contact",
        "method": "POST",
        "fields": [
            { "name": "fullName", "type": "text", "label": "Full Name" },
            { "name": "email", "type": "email", "label": "Email Address" },
            { "name": "message", "type": "textarea", "label": "Message" }
        ],
        "submit": { "label": "Send Message" }
    }"#;

    fn handler(backend: &MockGenerativeBackend) -> GenerateFormHandler {
        GenerateFormHandler::new(Arc::new(backend.clone()))
    }

    fn command(prompt: &str) -> GenerateFormCommand {
        GenerateFormCommand::new(UserId::new("user-1").unwrap(), prompt)
    }

    #[tokio::test]
    async fn contact_form_request_yields_form_config() {
        let backend =
            MockGenerativeBackend::new().with_text(format!("```json\n{}\n```", CONTACT_FORM));

        let config = handler(&backend)
            .generate(command("I need a contact form with name, email, message"))
            .await
            .unwrap();

        let expected: serde_json::Value = serde_json::from_str(CONTACT_FORM).unwrap();
        assert_eq!(serde_json::to_value(&config).unwrap(), expected);
        assert_eq!(config.fields().as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn request_text_is_embedded_in_outbound_prompt() {
        let backend = MockGenerativeBackend::new().with_text(CONTACT_FORM);

        handler(&backend)
            .handle(command("a newsletter signup"))
            .await
            .unwrap();

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("USER REQUEST: \"a newsletter signup\""));
    }

    #[tokio::test]
    async fn custom_composer_is_used() {
        let backend = MockGenerativeBackend::new().with_text(CONTACT_FORM);
        let handler = handler(&backend)
            .with_composer(PromptComposer::new("Build: {user_request}").unwrap());

        handler.handle(command("a login form")).await.unwrap();

        assert_eq!(backend.prompts(), vec!["Build: a login form".to_string()]);
    }

    #[tokio::test]
    async fn irrelevant_prompt_yields_signal() {
        let backend = MockGenerativeBackend::new().with_text(
            r#"{"error":"IrrelevantPrompt","message":"That is not a form request."}"#,
        );

        let outcome = handler(&backend)
            .handle(command("what's the weather tomorrow?"))
            .await
            .unwrap();

        match outcome {
            GenerationOutcome::Irrelevant(signal) => {
                assert_eq!(signal.message(), Some("That is not a form request."));
            }
            other => panic!("expected irrelevant signal, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fenced_irrelevant_prompt_is_an_error_through_generate() {
        let backend = MockGenerativeBackend::new()
            .with_text("```json\n{\"error\":\"IrrelevantPrompt\",\"message\":\"No.\"}\n```");

        let err = handler(&backend)
            .generate(command("tell me a joke"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            FormGenerationError::IrrelevantPrompt {
                message: Some("No.".to_string())
            }
        );
        assert_eq!(err.stage(), GenerationStage::Validating);
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_backend_call() {
        let backend = MockGenerativeBackend::new().with_text(CONTACT_FORM);

        let err = handler(&backend).handle(command("")).await.unwrap_err();

        assert_eq!(
            err,
            FormGenerationError::Request(ValidationError::empty_field("prompt"))
        );
        assert_eq!(err.stage(), GenerationStage::Composing);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_text_payload_is_extraction_error() {
        let backend = MockGenerativeBackend::new().with_envelope(ResponseEnvelope::from(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })));

        let err = handler(&backend).handle(command("a form")).await.unwrap_err();

        assert_eq!(err, FormGenerationError::extraction("text"));
        assert_eq!(err.stage(), GenerationStage::Extracting);
    }

    #[tokio::test]
    async fn prose_answer_is_decode_error() {
        let backend = MockGenerativeBackend::new().with_text("Sure! Here is your form.");

        let err = handler(&backend).handle(command("a form")).await.unwrap_err();

        match err {
            FormGenerationError::Decode(DecodeError { text, .. }) => {
                assert_eq!(text, "Sure! Here is your form.");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_text_payload_is_decode_error() {
        let backend = MockGenerativeBackend::new().with_text("");

        let err = handler(&backend).handle(command("a form")).await.unwrap_err();

        assert_eq!(err.stage(), GenerationStage::Decoding);
    }

    #[tokio::test]
    async fn config_without_submit_is_schema_error() {
        let backend = MockGenerativeBackend::new().with_text(r#"{"fields":[]}"#);

        let err = handler(&backend).handle(command("a form")).await.unwrap_err();

        assert_eq!(err, FormGenerationError::Schema(SchemaError::MissingSubmit));
    }

    #[tokio::test]
    async fn backend_error_is_propagated() {
        let backend =
            MockGenerativeBackend::new().with_error(BackendError::status(503, "overloaded"));

        let err = handler(&backend).handle(command("a form")).await.unwrap_err();

        assert_eq!(
            err,
            FormGenerationError::Backend(BackendError::status(503, "overloaded"))
        );
        assert_eq!(err.stage(), GenerationStage::AwaitingBackend);
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let backend = MockGenerativeBackend::new()
            .with_text(CONTACT_FORM)
            .with_delay(Duration::from_millis(500));
        let handler = handler(&backend).with_timeout(Duration::from_millis(20));

        let err = handler.handle(command("a form")).await.unwrap_err();

        assert_eq!(
            err,
            FormGenerationError::Backend(BackendError::Timeout { timeout_ms: 20 })
        );
    }

    #[test]
    fn command_gets_fresh_trace_id() {
        let a = command("x");
        let b = command("x");
        assert_ne!(a.trace_id, b.trace_id);
    }
}
