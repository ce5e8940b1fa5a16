//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `BETTERFORM` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use betterform::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod auth;
mod error;
mod server;

pub use ai::{AiConfig, BACKEND_TIMEOUT_SLACK_SECS};
pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_BYTES};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Unprefixed variable names still honoured as defaults, with their config keys.
const LEGACY_VARIABLES: [(&str, &str); 3] = [
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("GEMINI_MODEL_NAME", "gemini.model"),
    ("JWT_SECRET", "auth.jwt_secret"),
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini backend configuration
    #[serde(default)]
    pub gemini: AiConfig,

    /// Session token verification
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds defaults from the unprefixed `GEMINI_API_KEY`,
    ///    `GEMINI_MODEL_NAME` and `JWT_SECRET` variables
    /// 3. Reads environment variables with `BETTERFORM` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BETTERFORM__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BETTERFORM__GEMINI__MODEL=...` -> `gemini.model = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (variable, key) in LEGACY_VARIABLES {
            if let Ok(value) = std::env::var(variable) {
                builder = builder.set_default(key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("BETTERFORM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gemini.validate()?;
        self.auth.validate(&self.server.environment)?;

        let backend_secs = self.gemini.backend_deadline_secs();
        if backend_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                backend_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
