//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a bearer token.
//! They have **no external dependencies**: any token scheme can populate them
//! via the `SessionValidator` port.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token validation:
//! let user = AuthenticatedUser::new(UserId::new("user-123")?, None, None);
//!
//! // Inject into request extensions for handlers to use
//! request.extensions_mut().insert(user);
//! ```

use super::UserId;
use thiserror::Error;

/// Authenticated caller extracted from a validated token.
///
/// Only `id` is guaranteed; the web app's tokens carry `sub` and may carry
/// profile claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier (`sub` claim).
    pub id: UserId,

    /// Email address, when the token carries one.
    pub email: Option<String>,

    /// Display name, when the token carries one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is malformed, has an invalid signature, or lacks required claims.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            Some("test@example.com".to_string()),
            Some("Test User".to_string()),
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email.as_deref(), Some("test@example.com"));
        assert_eq!(user.display_name.as_deref(), Some("Test User"));
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }
}
