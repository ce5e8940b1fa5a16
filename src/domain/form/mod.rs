//! Form generation domain.
//!
//! Pure pipeline pieces that turn a natural-language request into a validated
//! form configuration:
//!
//! ```text
//! PromptRequest → prompt::compose → [backend] → envelope::extract_text
//!     → sanitizer::sanitize → decoder::decode → validator::validate
//! ```
//!
//! Only the backend call performs I/O; it lives behind the
//! `GenerativeBackend` port and is sequenced by the application layer.

pub mod decoder;
pub mod envelope;
mod errors;
pub mod prompt;
pub mod sanitizer;
mod stage;
pub mod validator;

pub use decoder::{decode, DecodeError};
pub use envelope::{extract_text, ResponseEnvelope, TEXT_KEY};
pub use errors::FormGenerationError;
pub use prompt::{PromptComposer, PromptRequest};
pub use sanitizer::sanitize;
pub use stage::{GenerationStage, StageTracker};
pub use validator::{
    validate, FormConfig, GenerationOutcome, IrrelevantPromptSignal, SchemaError,
};
