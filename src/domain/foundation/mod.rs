//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, authentication types, error codes and the
//! state machine trait shared across the BetterForm domain.

mod auth;
mod errors;
mod ids;
mod state_machine;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{ErrorCode, ValidationError};
pub use ids::{TraceId, UserId};
pub use state_machine::StateMachine;
