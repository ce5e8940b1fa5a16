//! HTTP adapter for form generation.
//!
//! - `POST /api/chat` - Generate a form configuration from a natural-language prompt

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, GenerateFormRequest};
pub use handlers::FormHandlers;
pub use routes::form_routes;
