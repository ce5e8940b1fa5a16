//! Generative Backend Adapters.
//!
//! Implementations of the GenerativeBackend port.
//!
//! ## Available Adapters
//!
//! - `GeminiBackend` - Google Gemini `generateContent`
//! - `MockGenerativeBackend` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiBackend, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock_provider::{MockGenerativeBackend, MockReply};
