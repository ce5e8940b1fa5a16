//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 session tokens)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to verify token signatures
    pub jwt_secret: Option<Secret<String>>,

    /// Expected `iss` claim, if tokens carry one
    pub issuer: Option<String>,

    /// Expected `aud` claim, if tokens carry one
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, short secrets are refused.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = match &self.jwt_secret {
            Some(secret) if !secret.expose_secret().is_empty() => secret.expose_secret(),
            _ => return Err(ValidationError::MissingRequired("JWT_SECRET")),
        };

        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_BYTES));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Some(Secret::new(secret.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_secret_fails() {
        assert_eq!(
            AuthConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("JWT_SECRET"))
        );
        assert_eq!(
            with_secret("").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("JWT_SECRET"))
        );
    }

    #[test]
    fn test_short_secret_allowed_in_development() {
        assert!(with_secret("dev").validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        assert_eq!(
            with_secret("dev").validate(&Environment::Production),
            Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_BYTES))
        );
    }

    #[test]
    fn test_long_secret_accepted_in_production() {
        let secret = "s".repeat(MIN_PRODUCTION_SECRET_BYTES);
        assert!(with_secret(&secret).validate(&Environment::Production).is_ok());
    }
}
