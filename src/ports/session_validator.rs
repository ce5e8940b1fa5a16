//! Session validation port for bearer tokens.
//!
//! Tokens are minted by the web app's auth provider and signed with a shared
//! secret. This port only verifies them and extracts the caller's identity,
//! so the HTTP middleware stays independent of the token scheme.
//!
//! # Example Implementation
//!
//! ```ignore
//! pub struct JwtSessionValidator { ... }
//!
//! #[async_trait]
//! impl SessionValidator for JwtSessionValidator {
//!     async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
//!         // 1. Verify the signature
//!         // 2. Check exp (and iss/aud when configured)
//!         // 3. Map sub to UserId
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Verify the token signature
/// - Reject expired tokens with `AuthError::TokenExpired`
/// - Reject malformed tokens, bad signatures and tokens without `sub` with
///   `AuthError::InvalidToken`
/// - Return `AuthError::ServiceUnavailable` for transient failures
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
