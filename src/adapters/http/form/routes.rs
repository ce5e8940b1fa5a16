//! HTTP routes for form generation endpoints.

use axum::{routing::post, Router};

use super::handlers::{generate_form, FormHandlers};

/// Creates the form router. Suitable for nesting under `/api`.
///
/// # Routes
///
/// - `POST /chat` - Generate a form configuration from a prompt
pub fn form_routes(handlers: FormHandlers) -> Router {
    Router::new()
        .route("/chat", post(generate_form))
        .with_state(handlers)
}
