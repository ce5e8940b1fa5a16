//! HTTP handlers for form generation endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::form::{GenerateFormCommand, GenerateFormHandler};
use crate::domain::form::{FormGenerationError, GenerationOutcome};

use super::dto::{ErrorResponse, GenerateFormRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FormHandlers {
    generate_handler: Arc<GenerateFormHandler>,
}

impl FormHandlers {
    pub fn new(generate_handler: Arc<GenerateFormHandler>) -> Self {
        Self { generate_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Generate a form configuration from a prompt
///
/// Responds with the form configuration object verbatim.
pub async fn generate_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<GenerateFormRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::invalid_request(rejection.body_text())),
            )
                .into_response()
        }
    };

    let cmd = GenerateFormCommand::new(user.id, req.prompt);

    match handlers.generate_handler.handle(cmd).await {
        Ok(GenerationOutcome::Form(config)) => (StatusCode::OK, Json(config)).into_response(),
        Ok(GenerationOutcome::Irrelevant(signal)) => {
            handle_generation_error(FormGenerationError::irrelevant(&signal))
        }
        Err(e) => handle_generation_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn status_for(error: &FormGenerationError) -> StatusCode {
    match error {
        FormGenerationError::Request(_) => StatusCode::BAD_REQUEST,
        FormGenerationError::Backend(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        FormGenerationError::Backend(_)
        | FormGenerationError::Extraction { .. }
        | FormGenerationError::Decode(_)
        | FormGenerationError::Schema(_) => StatusCode::BAD_GATEWAY,
        FormGenerationError::IrrelevantPrompt { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn handle_generation_error(error: FormGenerationError) -> Response {
    (status_for(&error), Json(ErrorResponse::from(&error))).into_response()
}
