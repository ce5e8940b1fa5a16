//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that requires a valid Bearer token and injects the user into extensions
//! - `RequireAuth` - Extractor that reads the authenticated user
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, keeping it independent of
//! the token scheme.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! # Example
//!
//! ```ignore
//! let validator: Arc<dyn SessionValidator> = Arc::new(MockSessionValidator::new());
//!
//! let app = Router::new()
//!     .route("/api/protected", get(protected_handler))
//!     .layer(middleware::from_fn_with_state(validator.clone(), auth_middleware));
//!
//! async fn protected_handler(RequireAuth(user): RequireAuth) -> String {
//!     format!("Hello, {}!", user.id)
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser, ErrorCode};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication middleware that requires a valid Bearer token.
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// - missing header → 401
/// - header without the `Bearer ` prefix → 401
/// - invalid or expired token → 401
/// - validator unavailable → 503
///
/// On success the `AuthenticatedUser` is inserted into request extensions.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Ok(token) => token,
        Err(rejection) => return rejection.into_response(),
    };

    match validator.validate(&token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => AuthRejection::from(e).into_response(),
    }
}

fn bearer_token(request: &Request) -> Result<String, AuthRejection> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingHeader)?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::to_owned)
        .ok_or(AuthRejection::NotBearer)
}

/// Extractor that requires authentication.
///
/// Reads the user injected by `auth_middleware`; returns 401 when absent.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header.
    MissingHeader,
    /// `Authorization` header is not a Bearer token.
    NotBearer,
    /// The token failed validation.
    InvalidToken,
    /// The token has expired.
    TokenExpired,
    /// The validator could not be reached.
    Unavailable,
    /// No authenticated user in the request.
    Unauthenticated,
}

impl From<AuthError> for AuthRejection {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidToken => AuthRejection::InvalidToken,
            AuthError::TokenExpired => AuthRejection::TokenExpired,
            AuthError::ServiceUnavailable(msg) => {
                tracing::error!("Auth service unavailable: {}", msg);
                AuthRejection::Unavailable
            }
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::MissingHeader => {
                (StatusCode::UNAUTHORIZED, "Authorization header is required")
            }
            AuthRejection::NotBearer => {
                (StatusCode::UNAUTHORIZED, "Bearer token format is required")
            }
            AuthRejection::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthRejection::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthRejection::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            ),
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": ErrorCode::Unauthorized.as_str()
            })),
        )
            .into_response()
    }
}
