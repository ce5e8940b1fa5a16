//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerativeBackend` - Outbound text generation (Gemini in production)
//! - `SessionValidator` - Bearer token verification

mod generative_backend;
mod session_validator;

pub use generative_backend::{BackendError, BackendInfo, GenerativeBackend};
pub use session_validator::SessionValidator;
