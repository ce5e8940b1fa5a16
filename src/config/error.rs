//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Gemini base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error(
        "Request timeout ({request_secs}s) must exceed the backend deadline ({backend_secs}s)"
    )]
    RequestTimeoutTooShort { request_secs: u64, backend_secs: u64 },

    #[error("JWT secret must be at least {0} bytes in production")]
    WeakJwtSecret(usize),
}
